//! Geometry Factory
//!
//! Pure CPU-side construction of parametric primitives and merged batch
//! meshes. Nothing in this module touches the GPU; the renderer uploads
//! finished meshes as-is. All construction is pure — building a mesh
//! has no side effects and never fails for valid positive dimensions.

pub mod humanoid;
pub mod mesh;
pub mod primitives;

pub use humanoid::{accessory_light_mesh, crowd_body_mesh, crowd_skin_mesh};
pub use mesh::{merge, Mesh};
pub use primitives::{build_box, build_cone, build_cylinder, build_plane, build_sphere};
