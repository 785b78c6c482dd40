//! PSF maps and FWHM comparison charts

use std::path::Path;

use colorous::Gradient;
use plotters::{coord::Shift, prelude::*};

use crate::{Grid, PsfField, Simulation};

/// PSF maps file name
pub const PSF_COMPARISON: &str = "PSF_comparison.png";
/// FWHM chart file name
pub const FWHM_COMPARISON: &str = "FWHM_comparison.png";

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("failed to draw the chart: {0}")]
    Drawing(String),
}
impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for PlotError {
    fn from(value: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(value.to_string())
    }
}
type Result<T> = std::result::Result<T, PlotError>;

/// Draws a normalized field as a heat map with axes in nm
fn heat_map<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    field: &PsfField,
    grid: &Grid,
    cmap: Gradient,
) -> Result<()> {
    let half = grid.axis().last().copied().unwrap_or_default();
    let d = grid.spacing().unwrap_or_default() / 2.;
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .margin(10)
        .build_cartesian_2d(-half - d..half + d, -half - d..half + d)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("nm")
        .y_desc("nm")
        .draw()?;
    let axis = grid.axis();
    chart.draw_series(field.row_iter().enumerate().flat_map(|(i, row)| {
        let y = axis[i];
        row.iter()
            .enumerate()
            .map(|(j, &value)| {
                let x = axis[j];
                let c = cmap.eval_continuous(value.clamp(0., 1.));
                Rectangle::new(
                    [(x - d, y - d), (x + d, y + d)],
                    RGBColor(c.r, c.g, c.b).filled(),
                )
            })
            .collect::<Vec<_>>()
    }))?;
    Ok(())
}

impl Simulation {
    /// Saves the excitation, depletion and effective PSFs side by side
    pub fn plot_psfs<P: AsRef<Path>>(&self, filename: P) -> Result<()> {
        let root = BitMapBackend::new(filename.as_ref(), (1536, 512)).into_drawing_area();
        root.fill(&WHITE)?;
        let panels = root.split_evenly((1, 3));
        let Self { params, grid, fields, .. } = self;
        heat_map(
            &panels[0],
            &format!("Excitation PSF ({} nm)", params.lambda_exc()),
            &fields.excitation,
            grid,
            colorous::VIRIDIS,
        )?;
        heat_map(
            &panels[1],
            &format!("STED Donut Beam ({} nm)", params.lambda_sted()),
            &fields.depletion,
            grid,
            colorous::INFERNO,
        )?;
        heat_map(
            &panels[2],
            "Effective PSF (STED Applied)",
            &fields.effective,
            grid,
            colorous::VIRIDIS,
        )?;
        root.present()?;
        Ok(())
    }
    /// Saves the confocal versus STED FWHM chart
    pub fn plot_fwhm<P: AsRef<Path>>(&self, filename: P) -> Result<()> {
        let fwhm = [self.metrics.fwhm_exc_nm(), self.metrics.fwhm_eff_nm()];
        let labels = ["Classic confocal", "After STED"];
        let fwhm_max = fwhm.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let plot = BitMapBackend::new(filename.as_ref(), (768, 512)).into_drawing_area();
        plot.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&plot)
            .caption("FWHM Comparison: Confocal vs STED", ("sans-serif", 20))
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .margin(10)
            .build_cartesian_2d(-0.5f64..1.5f64, 0f64..fwhm_max * 1.1)?;
        chart
            .configure_mesh()
            .x_labels(2)
            .x_label_formatter(&|x| {
                let i = x.round();
                if i < 0. {
                    return String::new();
                }
                labels
                    .get(i as usize)
                    .map(|l| l.to_string())
                    .unwrap_or_default()
            })
            .x_desc("Method")
            .y_desc("FWHM (nm)")
            .draw()?;

        let color = colorous::TABLEAU10[0];
        let rgb = RGBColor(color.r, color.g, color.b);
        chart
            .draw_series(LineSeries::new(
                fwhm.iter().enumerate().map(|(i, &w)| (i as f64, w)),
                &rgb,
            ))?
            .label("Resolution Comparison")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &rgb));
        chart.draw_series(
            fwhm.iter()
                .enumerate()
                .map(|(i, &w)| Circle::new((i as f64, w), 5, rgb.filled())),
        )?;
        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
        plot.present()?;
        Ok(())
    }
}
