pub mod folder_location_functions;
pub mod initialization_functions;
pub mod main_loop_functions;
