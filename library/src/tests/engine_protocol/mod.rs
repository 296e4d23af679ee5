mod test_render_cycle;
mod test_streaming_service;
