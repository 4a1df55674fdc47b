use crate::coords::Point;
use crate::sampler::PathSampler;
use std::fs::{self, File};
use std::io::Result;
use std::io::Write;
use std::path::PathBuf;

/// Writes test geometry as SVG for visual inspection
pub struct SvgPlot {
    lines: Vec<String>,
    point_raduis: f64,
    color: String,
    line_width: f64,
}

fn find_svg_dir() -> Result<PathBuf> {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("target");
    if !dir.is_dir() {
        dir = std::env::temp_dir();
    }
    dir.push("test_files_svg");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

impl SvgPlot {
    pub fn new() -> SvgPlot {
        SvgPlot {
            lines: Vec::new(),
            point_raduis: 1.0,
            color: "black".to_string(),
            line_width: 0.5,
        }
    }

    pub fn set_point_radius(&mut self, radius: f64) {
        self.point_raduis = radius;
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    pub fn add_point(&mut self, p: Point) {
        self.lines.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}" style="fill:{}"/>"#,
            p.x, p.y, self.point_raduis, self.color
        ));
    }

    pub fn add_line(&mut self, p1: Point, p2: Point) {
        self.lines.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"  style="stroke:{};fill:none;stroke-width:{}"/>"#,
            p1.x, p1.y, p2.x, p2.y, self.color, self.line_width
        ));
    }

    /// Draws the path as a polyline through samples `step` apart
    pub fn add_path<S: PathSampler + ?Sized>(&mut self, path: &S, step: f64) {
        let len = path.length();
        let mut d = String::new();
        let mut pos = 0.0;
        while pos < len {
            let p = path.point_at(pos);
            d.push_str(&format!("{}{},{} ", if d.is_empty() { "M" } else { "L" }, p.x, p.y));
            pos += step;
        }
        let p = path.point_at(len);
        d.push_str(&format!("{}{},{}", if d.is_empty() { "M" } else { "L" }, p.x, p.y));
        self.lines.push(format!(
            r#"<path d="{}" style="stroke:{};fill:none;stroke-width:{}"/>"#,
            d, self.color, self.line_width
        ));
    }

    pub fn write(&self, file_name: &str) -> Result<()> {
        let dir = find_svg_dir()?;
        let file_path = dir.join(file_name).with_extension("svg");
        let mut file = File::create(file_path)?;
        file.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="300px" height="200px">
"#,
        )?;
        for l in &self.lines {
            file.write_all(b"  ")?;
            file.write_all(l.as_bytes())?;
            file.write_all(b"\n")?;
        }
        file.write_all(b"</svg>\n")?;
        Ok(())
    }
}
