pub mod bounding_box;
pub mod box_index;
