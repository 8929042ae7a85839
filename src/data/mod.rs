pub mod category;
pub mod segments;
pub mod session;
pub mod trace_look;
pub mod visibility;
pub mod xvg;
