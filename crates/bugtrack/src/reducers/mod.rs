pub mod bugs_reducer;
pub mod projects_reducer;
