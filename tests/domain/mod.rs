mod sample_buffer_test;
mod uploaded_audio_test;
