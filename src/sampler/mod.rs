// Grid sampling for 2D lines and 3D surfaces
pub mod plot;
pub mod plot3d;
