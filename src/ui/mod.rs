pub mod legend;
pub mod panels;
pub mod range_slider;
