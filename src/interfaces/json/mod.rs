pub mod response_writer;
