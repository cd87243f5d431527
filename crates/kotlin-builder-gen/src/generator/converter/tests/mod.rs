mod support;
mod type_resolution;
