pub mod accresim_vis3d;
