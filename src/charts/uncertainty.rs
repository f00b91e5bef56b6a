//! Uncertainty-validation chart: prediction error against predicted
//! uncertainty, colored by point density.

use super::scatter::{ScatterView, TitleFormat};
use super::{Axis, ChartCanvas, Trace};
use crate::data::uncertainty::UncertaintyData;
use crate::palette::Rgb;
use crate::selection::style::ViewStyle;

const ONE_TO_ONE_MAX: f64 = 0.8;
const BINNED_COLOR: Rgb = Rgb(0x02, 0x93, 0x86);

pub const INITIAL_TITLE: &str = "Click a data point to select that galaxy";

/// Build the view. Only the data-point trace follows the selection.
pub fn build(data: &UncertaintyData, style: &ViewStyle) -> ScatterView {
    let mut canvas = ChartCanvas::new(
        INITIAL_TITLE,
        Axis {
            label: "Predicted RMS uncertainty".into(),
            log: false,
        },
        Axis {
            label: "Predicted - True".into(),
            log: false,
        },
    );

    let defaults = style.defaults_for(&data.density);
    let points = canvas.add_trace(Trace::markers(
        "Data points",
        data.pred_unc.clone(),
        data.y_diff.clone(),
        data.names.clone(),
        defaults.clone(),
    ));

    let range = vec![0.0, ONE_TO_ONE_MAX];
    canvas.add_trace(
        Trace::line("one-to-one", range.clone(), range.clone(), Rgb::BLACK).hidden_from_legend(),
    );
    canvas.add_trace(Trace::line(
        "one-to-one",
        range.clone(),
        range.iter().map(|v| -v).collect(),
        Rgb::BLACK,
    ));

    let binned_name = "Binned RMS(Predicted - True)";
    canvas.add_trace(
        Trace::line(
            binned_name,
            data.binned_x.clone(),
            data.binned_y.clone(),
            BINNED_COLOR,
        )
        .hidden_from_legend(),
    );
    canvas.add_trace(Trace::line(
        binned_name,
        data.binned_x.clone(),
        data.binned_y.iter().map(|v| -v).collect(),
        BINNED_COLOR,
    ));

    let mut view = ScatterView::new(
        "uncertainty",
        canvas,
        style.highlight,
        TitleFormat::new(INITIAL_TITLE, "Selected {name}"),
    );
    view.bind_trace(points, data.names.clone(), defaults);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Table;
    use crate::selection::{EntityKey, SelectionView};

    fn data() -> UncertaintyData {
        let csv = "\
galname,pred_unc,y_diff,density
A,0.1,0.05,4.0
B,0.2,-0.1,2.0
binned,0.1,0.07,
binned,0.3,0.12,
C,0.3,0.2,1.0
";
        UncertaintyData::from_table(&Table::parse(csv, "u").unwrap(), "u").unwrap()
    }

    #[test]
    fn five_traces_with_mirrored_curves() {
        let view = build(&data(), &ViewStyle::default());
        let c = view.canvas();
        assert_eq!(c.traces.len(), 5);
        assert_eq!(c.traces[2].y, vec![0.0, -0.8]);
        assert_eq!(c.traces[4].y, vec![-0.07, -0.12]);
        assert_eq!(c.title, INITIAL_TITLE);
        assert_eq!(view.bindings().len(), 1);
        assert_eq!(view.bindings()[0].trace, 0);
    }

    #[test]
    fn densest_point_is_brightest() {
        let view = build(&data(), &ViewStyle::default());
        let m = &view.canvas().trace(0).unwrap().marker;
        assert_eq!(m.color[0], crate::palette::inferno(1.0));
        assert_eq!(m.opacity, vec![0.3; 3]);
        assert_eq!(m.size, vec![6.0; 3]);
    }

    #[test]
    fn select_highlights_and_titles() {
        let mut view = build(&data(), &ViewStyle::default());
        assert_eq!(view.on_select(&EntityKey::from("B")), 1);
        let m = &view.canvas().trace(0).unwrap().marker;
        assert_eq!(m.size, vec![6.0, 8.0, 6.0]);
        assert_eq!(view.canvas().title, "Selected B");
        // Reference lines keep their data
        assert_eq!(view.canvas().trace(1).unwrap().x, vec![0.0, 0.8]);
    }
}
