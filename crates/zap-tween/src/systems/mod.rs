pub mod action_manager;
