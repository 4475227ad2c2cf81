pub mod beams;
