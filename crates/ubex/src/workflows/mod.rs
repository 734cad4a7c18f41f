pub mod applications;
pub mod certificates;
pub mod partners;
pub mod profile;
pub mod references;
