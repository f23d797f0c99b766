/// One colored rectangle as uploaded to the GPU, in normalized device
/// coordinates (top-left corner, extent).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub offset: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}
