//! HTTP request handlers

pub mod recipes;

pub use recipes::{
    create_recipe, delete_recipe, filter_by_ingredient, filter_by_title, hello, list_recipes,
    update_recipe,
};
