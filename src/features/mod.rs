// Features layer - all feature modules

pub mod sleep;
pub mod voice;
