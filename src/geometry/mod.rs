//! Screen-space geometry of connection curves.
//!
//! A renderer measures the client-space rectangle of every connector marker and
//! of the canvas, and records them in a [`ConnectorRegistry`]. From the registry
//! and the edge set, [`compute_curves`] derives one cubic Bézier per edge, in
//! coordinates relative to the canvas origin. Nothing here is persisted.

use crate::automation::{BlockId, Connection, Endpoint};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

mod scheduler;

pub use scheduler::FrameScheduler;

/// Horizontal distance between each curve endpoint and its control point.
pub const DEFAULT_CURVE_OFFSET: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned rectangle in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn translated(&self, delta: Point) -> Rect {
        Rect::new(self.left + delta.x, self.top + delta.y, self.width, self.height)
    }
}

/// The measured rectangles of one block's two connectors.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ConnectorPair {
    input: Option<Rect>,
    output: Option<Rect>,
}

impl ConnectorPair {
    fn slot(&mut self, endpoint: Endpoint) -> &mut Option<Rect> {
        match endpoint {
            Endpoint::Input => &mut self.input,
            Endpoint::Output => &mut self.output,
        }
    }

    fn get(&self, endpoint: Endpoint) -> Option<Rect> {
        match endpoint {
            Endpoint::Input => self.input,
            Endpoint::Output => self.output,
        }
    }
}

/// Measured connector rectangles keyed by block and endpoint, plus the canvas
/// rectangle every curve is expressed relative to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectorRegistry {
    canvas: Rect,
    connectors: AHashMap<BlockId, ConnectorPair>,
}

impl ConnectorRegistry {
    pub fn new(canvas: Rect) -> Self {
        Self {
            canvas,
            connectors: AHashMap::new(),
        }
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn set_canvas(&mut self, canvas: Rect) {
        self.canvas = canvas;
    }

    /// Records the measured client rectangle of a connector marker.
    pub fn record(&mut self, block: BlockId, endpoint: Endpoint, rect: Rect) {
        *self.connectors.entry(block).or_default().slot(endpoint) = Some(rect);
    }

    pub fn get(&self, block: &BlockId, endpoint: Endpoint) -> Option<Rect> {
        self.connectors.get(block)?.get(endpoint)
    }

    /// Forgets both connectors of a block that is no longer rendered.
    pub fn forget(&mut self, block: &BlockId) {
        self.connectors.remove(block);
    }

    /// Shifts every connector by `delta`, as a pan of the block layout does.
    pub fn shift_all(&mut self, delta: Point) {
        for pair in self.connectors.values_mut() {
            for rect in [&mut pair.input, &mut pair.output].into_iter().flatten() {
                *rect = rect.translated(delta);
            }
        }
    }

    /// Number of recorded connectors, counting each endpoint separately.
    pub fn len(&self) -> usize {
        self.connectors
            .values()
            .map(|pair| usize::from(pair.input.is_some()) + usize::from(pair.output.is_some()))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Center of a connector relative to the canvas origin.
    pub fn anchor(&self, block: &BlockId, endpoint: Endpoint) -> Option<Point> {
        self.get(block, endpoint)
            .map(|rect| rect.center() - self.canvas.origin())
    }
}

/// A cubic Bézier curve from a source output connector to a destination input
/// connector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicCurve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CubicCurve {
    /// Builds the S-shaped curve whose control points leave the start to the
    /// right and enter the end from the left, `offset` pixels away.
    pub fn s_curve(start: Point, end: Point, offset: f64) -> Self {
        Self {
            start,
            control1: Point::new(start.x + offset, start.y),
            control2: Point::new(end.x - offset, end.y),
            end,
        }
    }

    /// Point on the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }

    /// SVG path data, `M x1 y1 C c1x c1y, c2x c2y, x2 y2`.
    pub fn to_svg_path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CubicCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }
}

/// The derived curve of one edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionPath {
    /// `"<from>-<to>"`, the key a renderer addresses the curve element by.
    pub key: String,
    pub from: BlockId,
    pub to: BlockId,
    pub curve: CubicCurve,
}

/// Computes the curve of every edge whose two connectors are registered.
/// Edges with a missing connector are skipped.
///
/// The result depends only on the registry and the edges, so calling this
/// twice without changes in between yields identical paths.
pub fn compute_curves(
    registry: &ConnectorRegistry,
    connections: &[Connection],
    offset: f64,
) -> Vec<ConnectionPath> {
    connections
        .iter()
        .filter_map(|connection| {
            let start = registry.anchor(&connection.from, Endpoint::Output)?;
            let end = registry.anchor(&connection.to, Endpoint::Input)?;
            Some(ConnectionPath {
                key: connection.path_key(),
                from: connection.from.clone(),
                to: connection.to.clone(),
                curve: CubicCurve::s_curve(start, end, offset),
            })
        })
        .collect()
}
