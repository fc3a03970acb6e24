mod analytics;
mod lifecycle;
mod library;
