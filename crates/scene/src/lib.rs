//! The retained scene graph: shape nodes, the element/group arena, the
//! per-node event emitter, and the flattened z-sorted storage view that
//! painters and the hit-tester consume.

pub mod element;
pub mod events;
pub mod scene;
pub mod shape;
pub mod storage;
pub mod style;
pub mod transform;

pub use element::{Element, ElementId, ElementKind, ElementPatch};
pub use events::{Event, EventEmitter, HandlerId};
pub use scene::{Scene, Traversal};
pub use shape::{
    Arc, BezierCurve, Circle, Image, ImageData, PathShape, Polygon, Polyline, RectShape, Sector,
    Shape, Text, TextAlign,
};
pub use storage::Storage;
pub use style::{Style, StylePatch};
pub use transform::{Transform, TransformPatch};
