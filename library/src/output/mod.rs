pub mod bmp;
pub mod color_depth;
pub mod frame_buffer_size;
