mod cave;
mod entry;
mod round;
