pub mod apply_frame_map;
pub mod batch_crop;
