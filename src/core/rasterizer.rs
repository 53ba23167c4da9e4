use crate::core::color;
use crate::core::error::RenderError;
use crate::core::frame_buffer::PixelSink;
use nalgebra::Point2;
use std::str::FromStr;

/// How wireframe edges are turned into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineAlgorithm {
    /// Integer error-term stepper, plots both endpoints.
    #[default]
    Bresenham,
    /// Recursive midpoint subdivision, never plots the endpoints.
    Midpoint,
}

impl LineAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineAlgorithm::Bresenham => "bresenham",
            LineAlgorithm::Midpoint => "midpoint",
        }
    }

    pub fn draws_endpoints(&self) -> bool {
        matches!(self, LineAlgorithm::Bresenham)
    }

    pub fn draw<P: PixelSink>(
        &self,
        sink: &mut P,
        p0: &Point2<f32>,
        p1: &Point2<f32>,
    ) -> Result<(), RenderError> {
        match self {
            LineAlgorithm::Bresenham => draw_b_line(sink, p0, p1),
            LineAlgorithm::Midpoint => draw_line(sink, p0, p1),
        }
    }
}

impl FromStr for LineAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bresenham" => Ok(LineAlgorithm::Bresenham),
            "midpoint" => Ok(LineAlgorithm::Midpoint),
            other => Err(format!(
                "Unknown line algorithm '{}', expected 'bresenham' or 'midpoint'",
                other
            )),
        }
    }
}

/// Plots one opaque white pixel unless the point is off screen.
///
/// The visible range is inclusive: `0 <= x <= width`, `0 <= y <= height`.
/// Non-finite points are culled as well.
pub fn draw_point<P: PixelSink>(sink: &mut P, point: &Point2<f32>) -> Result<(), RenderError> {
    let width = sink.width() as f32;
    let height = sink.height() as f32;
    let visible = point.x.is_finite()
        && point.y.is_finite()
        && point.x >= 0.0
        && point.y >= 0.0
        && point.x <= width
        && point.y <= height;

    if visible {
        sink.put_pixel(point.x, point.y, &color::white())?;
    }
    Ok(())
}

/// Subdivision depth that no on-screen segment can reach: ceil(log2(max dimension)) + 1.
pub fn midpoint_depth_limit(width: usize, height: usize) -> u32 {
    let max_dimension = width.max(height).max(2);
    max_dimension.next_power_of_two().trailing_zeros() + 1
}

/// Midpoint subdivider.
///
/// Segments of length <= 2 draw nothing; longer ones plot their midpoint and split in two.
/// Runs as a depth-first worklist capped at `midpoint_depth_limit`, so malformed input
/// (huge or NaN coordinates) still terminates.
pub fn draw_line<P: PixelSink>(
    sink: &mut P,
    p0: &Point2<f32>,
    p1: &Point2<f32>,
) -> Result<(), RenderError> {
    let depth_limit = midpoint_depth_limit(sink.width(), sink.height());
    let mut pending = vec![(*p0, *p1, 0u32)];

    while let Some((start, end, depth)) = pending.pop() {
        let delta = end - start;
        if delta.norm() <= 2.0 || depth > depth_limit {
            continue;
        }

        let middle = start + delta * 0.5;
        draw_point(sink, &middle)?;

        // LIFO: the (middle, start) half is processed first
        pending.push((middle, end, depth + 1));
        pending.push((middle, start, depth + 1));
    }
    Ok(())
}

/// Bresenham line between the truncated endpoints, both inclusive.
///
/// Every plotted pixel is 8-connected to the previous one. Endpoints further than one
/// screen size outside the viewport are first clipped to that guard band, so the step
/// count stays proportional to the screen no matter how far a vertex projects. A
/// segment whose endpoints lie off the same screen edge cannot light anything and is
/// skipped.
pub fn draw_b_line<P: PixelSink>(
    sink: &mut P,
    p0: &Point2<f32>,
    p1: &Point2<f32>,
) -> Result<(), RenderError> {
    if !(p0.x.is_finite() && p0.y.is_finite() && p1.x.is_finite() && p1.y.is_finite()) {
        return Ok(());
    }

    let band = GuardBand::around(sink.width(), sink.height());
    let Some((start, end)) = band.clip(
        (f64::from(p0.x), f64::from(p0.y)),
        (f64::from(p1.x), f64::from(p1.y)),
    ) else {
        return Ok(());
    };

    // Inside the band every coordinate fits comfortably in i64.
    let mut x0 = start.0 as i64;
    let mut y0 = start.1 as i64;
    let x1 = end.0 as i64;
    let y1 = end.1 as i64;

    let width = sink.width() as i64;
    let height = sink.height() as i64;
    if (x0 < 0 && x1 < 0)
        || (y0 < 0 && y1 < 0)
        || (x0 > width && x1 > width)
        || (y0 > height && y1 > height)
    {
        return Ok(());
    }

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        draw_point(sink, &Point2::new(x0 as f32, y0 as f32))?;
        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
    Ok(())
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// Screen rectangle grown by one screen size on every side.
struct GuardBand {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl GuardBand {
    fn around(width: usize, height: usize) -> Self {
        let margin = width.max(height).max(1) as f64;
        GuardBand {
            min_x: -margin,
            max_x: width as f64 + margin,
            min_y: -margin,
            max_y: height as f64 + margin,
        }
    }

    fn outcode(&self, (x, y): (f64, f64)) -> u8 {
        let mut code = 0;
        if x < self.min_x {
            code |= LEFT;
        } else if x > self.max_x {
            code |= RIGHT;
        }
        if y < self.min_y {
            code |= BOTTOM;
        } else if y > self.max_y {
            code |= TOP;
        }
        code
    }

    fn clamp(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            x.clamp(self.min_x, self.max_x),
            y.clamp(self.min_y, self.max_y),
        )
    }

    /// Cohen-Sutherland clip. Endpoints already inside the band come back unchanged;
    /// `None` when the segment misses the band entirely.
    fn clip(
        &self,
        mut p0: (f64, f64),
        mut p1: (f64, f64),
    ) -> Option<((f64, f64), (f64, f64))> {
        // Each pass pins one coordinate to an edge; rounding may leave a stray bit
        // after that, which the final clamp absorbs.
        for _ in 0..8 {
            let code0 = self.outcode(p0);
            let code1 = self.outcode(p1);
            if code0 | code1 == 0 {
                return Some((p0, p1));
            }
            if code0 & code1 != 0 {
                return None;
            }

            let outside = if code0 != 0 { code0 } else { code1 };
            let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
            let clipped = if outside & TOP != 0 {
                (p0.0 + dx * (self.max_y - p0.1) / dy, self.max_y)
            } else if outside & BOTTOM != 0 {
                (p0.0 + dx * (self.min_y - p0.1) / dy, self.min_y)
            } else if outside & RIGHT != 0 {
                (self.max_x, p0.1 + dy * (self.max_x - p0.0) / dx)
            } else {
                (self.min_x, p0.1 + dy * (self.min_x - p0.0) / dx)
            };

            if outside == code0 {
                p0 = clipped;
            } else {
                p1 = clipped;
            }
        }
        Some((self.clamp(p0), self.clamp(p1)))
    }
}
