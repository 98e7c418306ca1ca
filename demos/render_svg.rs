//! Renders the Delaunay edges and Voronoi diagram of a random point set to SVG.
//!
//! Run with: cargo run --example render_svg [output.svg] [count]

use dualgeom::bounds::Aabb2;
use dualgeom::{DelaunayBuilder, FortuneVoronoiBuilder, Point2};

use std::fs::File;
use std::io::Write;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 800.0;

/// SVG helper collecting elements into a document body
struct Svg {
    content: String,
    width: f64,
    height: f64,
}

impl Svg {
    fn new(width: f64, height: f64) -> Self {
        Self {
            content: String::new(),
            width,
            height,
        }
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, stroke: &str) {
        self.content.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="{}" stroke-dasharray="4 4"/>"#,
            x, y, w, h, stroke
        ));
        self.content.push('\n');
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.content.push_str(&format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
            cx, cy, r, fill
        ));
        self.content.push('\n');
    }

    fn line(&mut self, a: (f64, f64), b: (f64, f64), stroke: &str, stroke_width: f64) {
        self.content.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
            a.0, a.1, b.0, b.1, stroke, stroke_width
        ));
        self.content.push('\n');
    }

    fn save(&self, path: &str) -> std::io::Result<()> {
        let svg = format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">
<rect width="100%" height="100%" fill="#1a1a2e"/>
{}
</svg>"##,
            self.width, self.height, self.width, self.height, self.content
        );
        let mut file = File::create(path)?;
        file.write_all(svg.as_bytes())
    }
}

/// Maps world coordinates into the canvas, flipping y so it points up.
struct View {
    bounds: Aabb2<f64>,
    scale: f64,
}

impl View {
    fn fit(bounds: Aabb2<f64>) -> Self {
        let scale = (WIDTH / bounds.width()).min(HEIGHT / bounds.height());
        Self { bounds, scale }
    }

    fn map(&self, p: Point2<f64>) -> (f64, f64) {
        (
            (p.x - self.bounds.min.x) * self.scale,
            HEIGHT - (p.y - self.bounds.min.y) * self.scale,
        )
    }
}

fn generate_points(count: usize, seed: u64) -> Vec<Point2<f64>> {
    let mut state = seed;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state as f64 / u64::MAX as f64
    };
    (0..count)
        .map(|_| {
            let x = next() * 100.0;
            let y = next() * 100.0;
            Point2::new(x, y)
        })
        .collect()
}

fn main() -> std::io::Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "dual.svg".to_string());
    let count = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(40);

    let points = generate_points(count, 0x2545_F491_4F6C_DD1D);
    let voronoi = FortuneVoronoiBuilder::new();
    let edges = DelaunayBuilder::new().compute(&points);
    let segments = voronoi.construct(&points);

    let clip = match voronoi.clip_bounds(&points) {
        Some(b) => b,
        None => {
            println!("No points to render");
            return Ok(());
        }
    };
    let view = View::fit(clip);
    let mut svg = Svg::new(WIDTH, HEIGHT);

    let (x0, y1) = view.map(clip.min);
    let (x1, y0) = view.map(clip.max);
    svg.rect(x0, y0, x1 - x0, y1 - y0, "#444466");

    for e in &edges {
        svg.line(view.map(e.start), view.map(e.end), "#4a90d9", 1.0);
    }
    for s in &segments {
        svg.line(view.map(s.start), view.map(s.end), "#e94560", 1.5);
    }
    for &p in &points {
        let (cx, cy) = view.map(p);
        svg.circle(cx, cy, 3.0, "#f5f5f5");
    }

    svg.save(&path)?;
    println!(
        "Wrote {} ({} sites, {} Delaunay edges, {} Voronoi segments)",
        path,
        points.len(),
        edges.len(),
        segments.len()
    );
    Ok(())
}
