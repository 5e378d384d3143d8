pub mod dust_vis2d;
