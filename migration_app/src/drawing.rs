use std::f32::consts::PI;

use migration_lib::{
    flock::FrameState,
    math_helpers::MapProjection,
    options::RunOptions,
    route::Route,
};
use nannou::{color::*, prelude::*};

/// screen pixels per typographic point
const PX_PER_PT: f32 = 1.33;

const TRAIL_Z: f32 = 9.;
const GLOW_Z: f32 = 10.;
const BIRD_Z: f32 = 11.;
const MARKER_Z: f32 = 12.;
const OVERLAY_Z: f32 = 20.;

/// Radius in pixels of a scatter marker whose area is given in points squared
fn scatter_radius(area_pt2: f32) -> f32 {
    area_pt2.sqrt() * 0.5 * PX_PER_PT
}

pub trait Drawable {
    fn draw(&self, draw: &Draw, projection: &MapProjection, run_options: &RunOptions);
}

impl Drawable for Route {
    fn draw(&self, draw: &Draw, projection: &MapProjection, _run_options: &RunOptions) {
        // faint guide along the waypoints
        let points: Vec<Vec2> = self
            .waypoints()
            .iter()
            .map(|w| projection.to_screen(w.location()))
            .collect();
        draw.polyline()
            .weight(1.)
            .color(srgba(1., 1., 1., 0.15))
            .points(points);

        let start = projection.to_screen(self.start().location());
        draw.ellipse()
            .xy(start)
            .radius(5. * PX_PER_PT)
            .color(CYAN)
            .z(MARKER_Z);

        let dest = projection.to_screen(self.destination().location());
        draw_triangle_down(draw, dest, 6. * PX_PER_PT, LIME);
    }
}

impl Drawable for FrameState {
    fn draw(&self, draw: &Draw, projection: &MapProjection, run_options: &RunOptions) {
        for trail in self.trails.iter() {
            if trail.len() < 2 {
                continue;
            }
            draw.polyline()
                .weight(2.)
                .color(srgba(1., 0.647, 0., 0.7))
                .points(trail.iter().map(|p| projection.to_screen(*p)))
                .z(TRAIL_Z);
        }

        let glow_radius = scatter_radius(run_options.glow_size);
        let bird_radius = scatter_radius(run_options.marker_size);

        for p in self.positions.iter() {
            let xy = projection.to_screen(*p);

            draw.ellipse()
                .xy(xy)
                .radius(glow_radius)
                .color(srgba(1., 1., 0., 0.3))
                .z(GLOW_Z);

            draw.polygon()
                .points(star_points(bird_radius * 1.6, bird_radius * 0.65))
                .xy(xy)
                .color(RED)
                .z(BIRD_Z);
        }
    }
}

/// Five pointed star centered at the origin, first tip pointing up
fn star_points(outer: f32, inner: f32) -> Vec<Vec2> {
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let theta = PI / 2. + i as f32 * PI / 5.;
            pt2(r * theta.cos(), r * theta.sin())
        })
        .collect()
}

fn draw_triangle_down<C>(draw: &Draw, xy: Vec2, size: f32, color: C)
where
    C: IntoLinSrgba<f32>,
{
    draw.tri()
        .points(
            pt2(-size, size * 0.6),
            pt2(size, size * 0.6),
            pt2(0., -size),
        )
        .xy(xy)
        .color(color)
        .z(MARKER_Z);
}

/// Dark backdrop with a 5 degree graticule
pub fn draw_map(draw: &Draw, projection: &MapProjection) {
    draw.background().color(srgb(0.07, 0.07, 0.09));

    let b = projection.bounds;
    let line_color = srgba(1., 1., 1., 0.06);

    let mut lon = (b.min_lon / 5.).ceil() * 5.;
    while lon <= b.max_lon {
        draw.line()
            .start(projection.to_screen(vec2(lon, b.min_lat)))
            .end(projection.to_screen(vec2(lon, b.max_lat)))
            .weight(1.)
            .color(line_color);
        lon += 5.;
    }

    let mut lat = (b.min_lat / 5.).ceil() * 5.;
    while lat <= b.max_lat {
        draw.line()
            .start(projection.to_screen(vec2(b.min_lon, lat)))
            .end(projection.to_screen(vec2(b.max_lon, lat)))
            .weight(1.)
            .color(line_color);
        lat += 5.;
    }
}

/// Title along the top edge and the legend in the upper right corner
pub fn draw_overlay(draw: &Draw, win: Rect, run_options: &RunOptions) {
    draw.text(&run_options.title)
        .x_y(0., win.top() - 30.)
        .w(win.w() - 40.)
        .font_size(22)
        .color(WHITE)
        .z(OVERLAY_Z);

    let box_w = 170.;
    let box_h = 60.;
    let box_xy = pt2(win.right() - box_w / 2. - 15., win.top() - 70. - box_h / 2.);

    draw.rect()
        .xy(box_xy)
        .w_h(box_w, box_h)
        .color(srgba(0., 0., 0., 0.5))
        .stroke(srgba(1., 1., 1., 0.3))
        .stroke_weight(1.)
        .z(OVERLAY_Z);

    let row_1 = box_xy + vec2(-box_w / 2. + 20., 14.);
    let row_2 = box_xy + vec2(-box_w / 2. + 20., -14.);

    draw.ellipse()
        .xy(row_1)
        .radius(5. * PX_PER_PT)
        .color(CYAN)
        .z(OVERLAY_Z + 1.);
    draw_legend_label(draw, row_1, "Starting Point");

    draw.tri()
        .points(pt2(-7., 4.), pt2(7., 4.), pt2(0., -8.))
        .xy(row_2)
        .color(LIME)
        .z(OVERLAY_Z + 1.);
    draw_legend_label(draw, row_2, "Destination");
}

fn draw_legend_label(draw: &Draw, marker_xy: Vec2, label: &str) {
    draw.text(label)
        .xy(marker_xy + vec2(75., 0.))
        .w(120.)
        .left_justify()
        .font_size(14)
        .color(WHITE)
        .z(OVERLAY_Z + 1.);
}

#[cfg(test)]
mod tests {
    use super::{scatter_radius, star_points};

    #[test]
    fn star_alternates_radii() {
        let pts = star_points(10., 4.);

        assert_eq!(pts.len(), 10);
        assert!((pts[0].length() - 10.).abs() < 1e-4);
        assert!((pts[1].length() - 4.).abs() < 1e-4);
        // first tip points straight up
        assert!(pts[0].x.abs() < 1e-4 && pts[0].y > 0.);
    }

    #[test]
    fn glow_is_larger_than_marker() {
        assert!(scatter_radius(150.) > scatter_radius(20.));
    }
}
