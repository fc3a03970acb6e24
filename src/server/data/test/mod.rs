mod admin;
mod book;
mod borrow_request;
mod genre;
mod inner_circle;
mod library;
mod user;
mod user_circle;
