pub mod articles;
pub mod banners;
pub mod home;
pub mod home_content;
pub mod login;
pub mod videos;
pub mod workflows;
