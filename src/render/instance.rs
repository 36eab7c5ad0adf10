use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4};

use crate::horse::parts::{Part, RootTransform};
use crate::scene::Scene;

/// Per-instance data uploaded to the GPU each frame.
/// Stride = 80 bytes: column-major model matrix + packed color.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct BoxInstance {
    pub model: [[f32; 4]; 4],
    /// RGBA packed as u32.
    pub color: u32,
    pub _pad: [u32; 3],
}

impl BoxInstance {
    /// Build an instance from a part, composing the group transform with
    /// the part's local transform. The unit cube is scaled to the part's
    /// box dimensions last, so rotation happens about the part's center.
    pub fn from_part(part: &Part, root: Mat4) -> Self {
        let local = Mat4::from_translation(part.position)
            * Mat4::from_euler(
                EulerRot::XYZ,
                part.rotation.x,
                part.rotation.y,
                part.rotation.z,
            )
            * Mat4::from_scale(part.dims);
        Self {
            model: (root * local).to_cols_array_2d(),
            color: part.color,
            _pad: [0; 3],
        }
    }
}

/// World matrix of the rig's root group.
pub fn root_matrix(root: &RootTransform) -> Mat4 {
    Mat4::from_translation(root.position)
        * Mat4::from_euler(
            EulerRot::XYZ,
            root.rotation.x,
            root.rotation.y,
            root.rotation.z,
        )
}

/// Collect one instance per visible part into `out` (cleared first).
/// The ground sits outside the root group and gets an identity parent.
pub fn collect_instances(scene: &Scene, out: &mut Vec<BoxInstance>) {
    out.clear();
    out.push(BoxInstance::from_part(&scene.ground, Mat4::IDENTITY));

    let root = root_matrix(&scene.horse.root);
    scene
        .horse
        .for_each_part(|part| out.push(BoxInstance::from_part(part, root)));
}
