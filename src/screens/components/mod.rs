pub mod edit_menu;
