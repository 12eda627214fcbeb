pub mod canvas;
pub mod gpu_context;
pub mod pipeline;
pub mod surface;
pub mod texture;

pub use canvas::Canvas;
pub use gpu_context::GpuContext;
pub use pipeline::SpritePipeline;
pub use surface::{Color, Rect, Surface, TextAlign};
pub use texture::Texture;
