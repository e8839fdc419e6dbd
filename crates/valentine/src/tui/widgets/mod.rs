mod dashboard;
mod landing;
mod proposal;
mod tools;
pub(super) mod util;
