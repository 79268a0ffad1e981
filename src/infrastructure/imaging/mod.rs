mod png_stager;

pub use png_stager::PngImageStager;
