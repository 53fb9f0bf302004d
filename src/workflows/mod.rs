pub mod volunteering;
