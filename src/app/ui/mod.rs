mod controls;
mod editor;
