pub mod sun_times;
