//! The 16-way compass position domain and its derived placement metrics.
//
//! `Metrics` is a pure function of `DockPosition`. The edge grouping divides
//! the ordinal space by 5, which does not partition 16 values evenly: the
//! corner-pinned positions sit at ordinals 0, 5, 10 and 15, and ordinal 15
//! is the only West-edge value. That asymmetry is load-bearing; the corner
//! pins below are the source of truth for boundary behavior.

use ratatui::layout::Rect;

/// Compass positions a dock can be anchored at, enumerated clockwise from
/// the north-west corner. Corner positions carry an axis flag naming the
/// edge that owns them: `_H` corners belong to a horizontal edge, `_V`
/// corners to a vertical edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum DockPosition {
    NwH,
    Nnw,
    N,
    Nne,
    NeH,
    NeV,
    Ene,
    E,
    Ese,
    SeV,
    SeH,
    Sse,
    S,
    Ssw,
    SwH,
    SwV,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenEdge {
    North,
    East,
    South,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JustifyH {
    West,
    Center,
    East,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JustifyV {
    North,
    Middle,
    South,
}

/// Derived placement tuple for one position: screen edge, flow orientation
/// and the justification pair along both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Metrics {
    pub edge: ScreenEdge,
    pub orientation: Orientation,
    pub justify_h: JustifyH,
    pub justify_v: JustifyV,
}

impl DockPosition {
    pub const ALL: [Self; 16] = [
        Self::NwH,
        Self::Nnw,
        Self::N,
        Self::Nne,
        Self::NeH,
        Self::NeV,
        Self::Ene,
        Self::E,
        Self::Ese,
        Self::SeV,
        Self::SeH,
        Self::Sse,
        Self::S,
        Self::Ssw,
        Self::SwH,
        Self::SwV,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Derive the placement metrics for this position.
    ///
    /// Recomputed on every call; callers must not cache the result across
    /// position mutations.
    pub fn metrics(self) -> Metrics {
        let edge = match self.ordinal() / 5 {
            0 => ScreenEdge::North,
            1 => ScreenEdge::East,
            2 => ScreenEdge::South,
            _ => ScreenEdge::West,
        };
        let orientation = match edge {
            ScreenEdge::North | ScreenEdge::South => Orientation::Horizontal,
            ScreenEdge::East | ScreenEdge::West => Orientation::Vertical,
        };
        // Corner pins override the edge defaults: positions at the East
        // edge's corners pin east, at the West edge's corners pin west.
        let justify_h = match self {
            Self::NeH | Self::SeH => JustifyH::East,
            Self::NwH | Self::SwH => JustifyH::West,
            _ => match edge {
                ScreenEdge::East => JustifyH::East,
                ScreenEdge::West => JustifyH::West,
                ScreenEdge::North | ScreenEdge::South => JustifyH::Center,
            },
        };
        let justify_v = match self {
            Self::NeV => JustifyV::North,
            Self::SeV | Self::SwV => JustifyV::South,
            _ => match edge {
                ScreenEdge::North => JustifyV::North,
                ScreenEdge::South => JustifyV::South,
                ScreenEdge::East | ScreenEdge::West => JustifyV::Middle,
            },
        };
        Metrics {
            edge,
            orientation,
            justify_h,
            justify_v,
        }
    }
}

impl ScreenEdge {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::North => "edge_north",
            Self::East => "edge_east",
            Self::South => "edge_south",
            Self::West => "edge_west",
        }
    }
}

impl Orientation {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl JustifyH {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::West => "justify_west",
            Self::Center => "justify_center",
            Self::East => "justify_east",
        }
    }
}

impl JustifyV {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::North => "justify_north",
            Self::Middle => "justify_middle",
            Self::South => "justify_south",
        }
    }
}

impl Metrics {
    /// The four semantic placement classes for this tuple, in stable order.
    pub fn class_names(self) -> [&'static str; 4] {
        [
            self.edge.class_name(),
            self.justify_h.class_name(),
            self.justify_v.class_name(),
            self.orientation.class_name(),
        ]
    }

    /// Resolve the container rect for a dock anchored with these metrics,
    /// relative to the scene root.
    ///
    /// `area` is the scene viewport; `content` is the latest content rect
    /// reported by the embedded surface (relative to its viewport). The
    /// container always grows to the content rect's bottom edge; horizontal
    /// edges span the full viewport width, vertical edges shrink to the
    /// content's right edge and justify along the viewport height.
    pub fn anchor(self, area: Rect, content: Rect) -> Rect {
        let height = content.bottom().min(area.height);
        match self.edge {
            ScreenEdge::North => Rect {
                x: 0,
                y: 0,
                width: area.width,
                height,
            },
            ScreenEdge::South => Rect {
                x: 0,
                y: area.height.saturating_sub(height),
                width: area.width,
                height,
            },
            ScreenEdge::East | ScreenEdge::West => {
                let width = content.right().min(area.width);
                let x = match self.edge {
                    ScreenEdge::East => area.width.saturating_sub(width),
                    _ => 0,
                };
                let y = match self.justify_v {
                    JustifyV::North => 0,
                    JustifyV::Middle => area.height.saturating_sub(height) / 2,
                    JustifyV::South => area.height.saturating_sub(height),
                };
                Rect {
                    x,
                    y,
                    width,
                    height,
                }
            }
        }
    }
}
