//! 2D status overlay: text lines and the load-cell chart.
//!
//! Coordinates are screen pixels with the origin at the top-left corner.

use forklift_sensor::SampleHistory;

use crate::state::SimulationState;

/// Left margin and line pitch of the status text.
const TEXT_X: f32 = 10.0;
const LINE_PITCH: f32 = 20.0;

/// Load-cell chart panel, anchored to the top-right corner.
const CHART_WIDTH: f32 = 280.0;
const CHART_HEIGHT: f32 = 180.0;
const CHART_MARGIN: f32 = 20.0;
/// Pixels per unit of reading.
const CHART_SCALE: f32 = 80.0;

/// Key legend shown at the bottom of the screen.
pub const CONTROLS_LEGEND: &str =
    "W/S: drive  A/D: strafe  Q/E: rotate  R/F: lift  1-4: load  Space: pick up  G: drop  Esc: quit";

/// One line of overlay text.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayText {
    /// Text content.
    pub text: String,
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
}

/// Load-cell chart: a panel and a polyline of recent readings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chart {
    /// Panel top-left corner.
    pub origin: [f32; 2],
    /// Panel size.
    pub size: [f32; 2],
    /// Polyline vertices, oldest first.
    pub points: Vec<[f32; 2]>,
    /// Panel title.
    pub label: String,
}

/// Everything drawn in 2D for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    /// Status lines.
    pub lines: Vec<OverlayText>,
    /// Load-cell chart.
    pub chart: Chart,
}

impl Overlay {
    /// Lays out the overlay for a `viewport` of `[width, height]` pixels.
    ///
    /// `carrying` names the cargo on the fork, if any.
    #[must_use]
    pub fn build(
        state: &SimulationState,
        history: &SampleHistory,
        carrying: Option<&str>,
        viewport: [f32; 2],
    ) -> Self {
        let pose = &state.pose;
        let vibration = &state.vibration;
        let mut status = vec![
            format!(
                "Position: X={:.1}, Y={:.1}",
                pose.position.x, pose.position.y
            ),
            format!("Heading: {:.1}°", pose.heading_deg),
            format!("Fork Height: {:.0}%", state.lift.fork_height),
            format!("Current Load: {:.1} kg", state.load),
            format!(
                "Vibration: {} (Amp: {:.3})",
                if vibration.is_active() { "ON" } else { "OFF" },
                vibration.amplitude()
            ),
            format!("Load Cell: {:.3}", state.last_sample),
        ];
        if let Some(name) = carrying {
            status.push(format!("Carrying: {name}"));
        }

        #[allow(clippy::cast_precision_loss)]
        let mut lines: Vec<OverlayText> = status
            .into_iter()
            .enumerate()
            .map(|(i, text)| OverlayText {
                text,
                x: TEXT_X,
                y: TEXT_X + LINE_PITCH * i as f32,
            })
            .collect();
        lines.push(OverlayText {
            text: CONTROLS_LEGEND.to_owned(),
            x: TEXT_X,
            y: viewport[1] - LINE_PITCH - TEXT_X,
        });

        Self {
            lines,
            chart: chart(history, viewport),
        }
    }
}

/// Builds the chart panel. Readings are spread across the panel width by
/// history capacity and plotted around the panel's horizontal mid-line.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn chart(history: &SampleHistory, viewport: [f32; 2]) -> Chart {
    let origin = [viewport[0] - CHART_WIDTH - CHART_MARGIN, CHART_MARGIN];
    let mid = origin[1] + CHART_HEIGHT / 2.0;
    let capacity = history.capacity() as f32;

    let points = history
        .values()
        .enumerate()
        .map(|(i, value)| {
            let x = origin[0] + CHART_WIDTH * i as f32 / capacity;
            let y = mid - value as f32 * CHART_SCALE;
            [x, y]
        })
        .collect();

    Chart {
        origin,
        size: [CHART_WIDTH, CHART_HEIGHT],
        points,
        label: "Load Cell Data".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotionConfig;

    #[test]
    fn status_lines_reflect_state() {
        let mut state = SimulationState::new(&MotionConfig::default());
        state.pose.heading_deg = 42.0;
        state.load = 5.0;
        let overlay = Overlay::build(&state, &SampleHistory::new(100), Some("cargo #2"), [1024.0, 768.0]);

        let texts: Vec<&str> = overlay.lines.iter().map(|l| l.text.as_str()).collect();
        assert!(texts.contains(&"Heading: 42.0°"));
        assert!(texts.contains(&"Fork Height: 5%"));
        assert!(texts.contains(&"Current Load: 5.0 kg"));
        assert!(texts.contains(&"Vibration: OFF (Amp: 0.000)"));
        assert!(texts.contains(&"Carrying: cargo #2"));
        assert_eq!(overlay.lines.last().map(|l| l.text.as_str()), Some(CONTROLS_LEGEND));
    }

    #[test]
    fn chart_scales_readings_around_midline() {
        let mut history = SampleHistory::new(100);
        history.push(0.0, 0.0);
        history.push(0.1, 1.0);
        let state = SimulationState::new(&MotionConfig::default());
        let overlay = Overlay::build(&state, &history, None, [1024.0, 768.0]);

        let chart = &overlay.chart;
        assert_eq!(chart.origin, [724.0, 20.0]);
        assert_eq!(chart.points.len(), 2);
        assert!((chart.points[0][1] - 110.0).abs() < 1e-4);
        assert!((chart.points[1][0] - (724.0 + 2.8)).abs() < 1e-4);
        assert!((chart.points[1][1] - 30.0).abs() < 1e-4);
    }
}
