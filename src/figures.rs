//! Turn a [`Config`] into a ready-to-render [`Figure`].

use crate::color::assign_colors;
use crate::config::{Config, CurvesSection, FigureKind, GroupsSection};
use crate::curves::{
    gaussian_pdf, generalized_gaussian_pdf, linspace, loss_curves, sigmoid_gaussian,
};
use crate::data::align::align_from_source;
use crate::data::loader::SeriesSource;
use crate::data::scatter::split_best;
use crate::error::{FigureError, Result};
use crate::figure::{Figure, Trace};

/// Build the figure selected by `config.figure`.
pub fn build_figure(config: &Config) -> Result<Figure> {
    let figure = match config.figure {
        FigureKind::Curves => {
            let section = require(&config.curves, config.figure)?;
            curves_figure(section, &section.runs)?
        }
        FigureKind::Segments => segments_figure(require(&config.segments, config.figure)?)?,
        FigureKind::Scatter => scatter_figure(require(&config.scatter, config.figure)?)?,
        FigureKind::Loss => {
            let s = &config.loss;
            let grid = linspace(s.domain[0], s.domain[1], s.samples)?;
            let mut fig = Figure::new(&s.name, "g(x)*f(x)", "loss");
            let colours = assign_colors(&[
                Some("black"),
                Some("steelblue"),
                Some("tomato"),
                Some("forestgreen"),
                Some("orange"),
            ])?;
            let curves = loss_curves(&grid).labelled();
            for ((label, points), colour) in curves.into_iter().zip(colours) {
                fig.push(Trace::line(label, points).with_color(colour));
            }
            fig
        }
        FigureKind::Gaussian => {
            let s = &config.gaussian;
            let grid = linspace(s.mu - 3.0 * s.sigma, s.mu + 3.0 * s.sigma, s.samples)?;
            let colours = assign_colors(&[Some("black"), Some("steelblue")])?;
            let mut fig = Figure::new(&s.name, "x", "y");
            fig.push(
                Trace::line("Gaussian", gaussian_pdf(&grid, s.mu, s.sigma)?)
                    .with_color(colours[0]),
            );
            fig.push(
                Trace::line("Sigmoid Gaussian", sigmoid_gaussian(&grid, s.mu, s.sigma)?)
                    .with_color(colours[1]),
            );
            fig
        }
        FigureKind::GeneralizedGaussian => {
            let s = &config.generalized_gaussian;
            let grid = linspace(s.mu - 3.0 * s.sigma, s.mu + 3.0 * s.sigma, s.samples)?;
            let requested: Vec<Option<&str>> =
                s.shapes.iter().map(|sh| sh.color.as_deref()).collect();
            let colours = assign_colors(&requested)?;

            let mut fig = Figure::new(&s.name, "x", "y");
            for (shape, colour) in s.shapes.iter().zip(colours) {
                let points = generalized_gaussian_pdf(&grid, s.mu, s.sigma, shape.beta)?;
                let label = format!("beta={}: {}", shape.beta, shape.label);
                fig.push(Trace::line(label, points).with_color(colour));
            }
            fig
        }
    };

    log::info!(
        "Built figure '{}' with {} traces",
        figure.name,
        figure.traces.len()
    );
    Ok(figure)
}

fn require<T>(section: &Option<T>, kind: FigureKind) -> Result<&T> {
    section
        .as_ref()
        .ok_or_else(|| FigureError::UnknownFigureSection(kind.as_str().to_string()))
}

/// Aligned run logs plotted against the shared step index.
pub fn curves_figure<S>(section: &CurvesSection, source: &S) -> Result<Figure>
where
    S: SeriesSource + ?Sized,
{
    let names: Vec<&str> = section.series.iter().map(|s| s.name.as_str()).collect();
    let aligned = align_from_source(source, &names, &section.params)?;

    let requested: Vec<Option<&str>> =
        section.series.iter().map(|s| s.color.as_deref()).collect();
    let colours = assign_colors(&requested)?;

    let mut fig = Figure::new(&section.name, &section.x_label, &section.y_label);
    for (run, colour) in section.series.iter().zip(colours) {
        let points = aligned.points(&run.name).unwrap_or_default();
        let label = run.label.clone().unwrap_or_else(|| run.name.clone());
        fig.push(Trace::line(label, points).with_color(colour));
    }
    Ok(fig)
}

/// One polyline per group, through the given coordinates.
pub fn segments_figure(section: &GroupsSection) -> Result<Figure> {
    let colours = group_colours(section)?;
    let mut fig = Figure::new(&section.name, &section.x_label, &section.y_label);
    for (group, colour) in section.groups.iter().zip(colours) {
        if group.x.len() != group.y.len() {
            return Err(FigureError::LengthMismatch {
                expected: group.x.len(),
                got: group.y.len(),
            });
        }
        let points = group.x.iter().zip(&group.y).map(|(&x, &y)| [x, y]).collect();
        fig.push(Trace::line(&group.label, points).with_color(colour));
    }
    Ok(fig)
}

/// Each group split into its best point (annotated) and the rest.
pub fn scatter_figure(section: &GroupsSection) -> Result<Figure> {
    let colours = group_colours(section)?;
    let mut fig = Figure::new(&section.name, &section.x_label, &section.y_label);
    for (group, colour) in section.groups.iter().zip(colours) {
        let ranked = split_best(&group.label, &group.x, &group.y)?;
        let [bx, by] = ranked.best;

        fig.push(Trace::scatter(&group.label, ranked.rest).with_color(colour));
        fig.push(
            Trace::scatter(format!("{} (best)", group.label), vec![ranked.best])
                .with_color(colour),
        );
        fig.annotate(ranked.best, format!("({bx:.1}, {by:.1})"));
    }
    Ok(fig)
}

fn group_colours(section: &GroupsSection) -> Result<Vec<crate::color::Rgb>> {
    let requested: Vec<Option<&str>> =
        section.groups.iter().map(|g| g.color.as_deref()).collect();
    assign_colors(&requested)
}
