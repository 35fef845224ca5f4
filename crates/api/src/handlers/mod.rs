pub mod branch;
pub mod my_character;
pub mod my_story;
pub mod my_substory;
pub mod story;
pub mod substory;
