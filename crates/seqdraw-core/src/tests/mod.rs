mod geom;
mod model;
