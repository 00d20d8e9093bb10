//! Bar chart of the comparison table: one bar group per resume, one bar per
//! skill column, rendered to SVG.

use crate::error::SkillScanError;
use crate::report::ComparisonTable;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

pub const CHART_TITLE: &str = "Skills Comparison Across Resumes";

const CHART_SIZE: (u32, u32) = (1200, 800);

/// Share of each group's slot taken by bars; the rest is the gap between groups.
const GROUP_FILL: f64 = 0.8;

/// Render `table` as an SVG bar chart at `path`.
///
/// An empty table still yields a valid SVG stating that nothing matched.
pub fn render_chart(table: &ComparisonTable, path: &Path) -> Result<(), SkillScanError> {
    let fail = |e: &dyn std::fmt::Display| SkillScanError::ChartRenderFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    };

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| fail(&e))?;

    if table.is_empty() || table.columns.is_empty() {
        let (w, h) = CHART_SIZE;
        root.draw(&Text::new(
            CHART_TITLE,
            (w as i32 / 2 - 200, 40),
            ("sans-serif", 28).into_font(),
        ))
        .map_err(|e| fail(&e))?;
        root.draw(&Text::new(
            "No resumes match the required skills.",
            (w as i32 / 2 - 180, h as i32 / 2),
            ("sans-serif", 20).into_font(),
        ))
        .map_err(|e| fail(&e))?;
        root.present().map_err(|e| fail(&e))?;
        return Ok(());
    }

    let groups = table.rows.len();
    let bars = table.columns.len();
    let y_max = (table.max_count() + 1) as f64;
    let names: Vec<String> = table.rows.iter().map(|r| r.document.clone()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..groups as f64 - 0.5, 0f64..y_max)
        .map_err(|e| fail(&e))?;

    let x_formatter = |x: &f64| {
        let i = x.round();
        if (x - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < names.len() {
            names[i as usize].clone()
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(groups)
        .x_label_formatter(&x_formatter)
        .y_desc("Skill Count")
        .x_desc("Resume")
        .draw()
        .map_err(|e| fail(&e))?;

    let bar_width = GROUP_FILL / bars as f64;
    for (j, skill) in table.columns.iter().enumerate() {
        let color = Palette99::pick(j).mix(0.9);
        let rects = table.rows.iter().enumerate().map(move |(i, row)| {
            let x0 = i as f64 - GROUP_FILL / 2.0 + j as f64 * bar_width;
            Rectangle::new([(x0, 0.0), (x0 + bar_width, row.counts[j] as f64)], color.filled())
        });
        chart
            .draw_series(rects)
            .map_err(|e| fail(&e))?
            .label(skill.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| fail(&e))?;

    root.present().map_err(|e| fail(&e))?;
    info!("Chart with {} resumes written to {}", groups, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TableRow;

    #[test]
    fn renders_grouped_bars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let table = ComparisonTable {
            columns: vec!["python".into(), "sql".into()],
            rows: vec![
                TableRow {
                    document: "alice.pdf".into(),
                    counts: vec![3, 1],
                },
                TableRow {
                    document: "bob.pdf".into(),
                    counts: vec![0, 2],
                },
            ],
        };

        render_chart(&table, &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(CHART_TITLE));
        assert!(svg.contains("alice.pdf"));
        assert!(svg.contains("python"));
    }

    #[test]
    fn empty_table_renders_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");

        render_chart(&ComparisonTable::default(), &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("No resumes match"));
    }
}
