pub mod step_writer;
