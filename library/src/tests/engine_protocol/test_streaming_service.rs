#[cfg(test)]
mod tests {
    use crate::config::ServiceConfig;
    use crate::geometry::alias::{Point, Vector};
    use crate::output::bmp::PIXEL_DATA_OFFSET;
    use crate::render::camera::CameraState;
    use crate::render::post_processing::PostProcessing;
    use crate::render::scene_parameters::SceneParameters;
    use crate::service::bitmap_format::BitmapFormat;
    use crate::service::bitmap_provider::BitmapProvider;
    use crate::service::streaming_service::StreamingService;
    use crate::tests::scaffolding::recording_engine::tests::{EngineProbe, FailurePoint, RecordingEngine};
    use crate::tests::scaffolding::session_setup::tests::{make_test_config, populate, FRAME_HEIGHT, FRAME_WIDTH};
    use byteorder::{ByteOrder, LittleEndian};
    use test_context::{test_context, TestContext};

    struct Context {
        system_under_test: StreamingService<RecordingEngine>,
        probe: EngineProbe,
    }

    #[must_use]
    fn make_context(config: &ServiceConfig) -> Context {
        let (engine, probe) = RecordingEngine::new();
        let mut system_under_test = StreamingService::new(config, engine).unwrap();
        populate(system_under_test.session_mut().scene_mut());
        Context { system_under_test, probe }
    }

    impl TestContext for Context {
        fn setup() -> Context {
            make_context(&make_test_config())
        }

        fn teardown(self) {
        }
    }

    fn bitmap(fixture: &mut Context) -> Vec<u8> {
        let parameters = fixture.system_under_test.get_scene_info();
        fixture.system_under_test.get_bitmap(0.0, &parameters, &PostProcessing::default()).unwrap()
    }

    fn move_camera(fixture: &mut Context, eye: Point, angles: Vector) {
        fixture.system_under_test.set_camera(eye, Point::new(0.0, 0.0, 0.0), angles);
    }

    #[test_context(Context)]
    #[test]
    fn test_raw_bitmap_size(fixture: &mut Context) {
        let actual = bitmap(fixture);
        assert_eq!(actual.len(), (FRAME_WIDTH * FRAME_HEIGHT * 4) as usize);
    }

    #[test_context(Context)]
    #[test]
    fn test_bmp_bitmap(fixture: &mut Context) {
        fixture.system_under_test.set_bitmap_format(BitmapFormat::BmpFile);

        let actual = bitmap(fixture);

        assert_eq!(&actual[0..2], b"BM");
        assert_eq!(LittleEndian::read_u32(&actual[2..6]), FRAME_WIDTH * FRAME_HEIGHT * 4);
        assert_eq!(LittleEndian::read_u32(&actual[18..22]), FRAME_WIDTH);
        assert_eq!(LittleEndian::read_u32(&actual[22..26]), FRAME_HEIGHT);
        assert_eq!(actual.len(), PIXEL_DATA_OFFSET + (FRAME_WIDTH * FRAME_HEIGHT * 3) as usize + 3);
    }

    #[test_context(Context)]
    #[test]
    fn test_client_iteration_is_ignored(fixture: &mut Context) {
        let parameters = SceneParameters { path_tracing_iteration: 50, ray_iterations: 9, ..fixture.system_under_test.get_scene_info() };

        fixture.system_under_test.get_bitmap(0.0, &parameters, &PostProcessing::default()).unwrap();

        let actual = fixture.system_under_test.get_scene_info();
        assert_eq!(actual.path_tracing_iteration, 1);
        assert_eq!(actual.ray_iterations, 9);
    }

    #[test_context(Context)]
    #[test]
    fn test_camera_change_resets_refinement(fixture: &mut Context) {
        bitmap(fixture);
        bitmap(fixture);
        assert_eq!(fixture.system_under_test.get_scene_info().path_tracing_iteration, 2);

        move_camera(fixture, Point::new(0.0, 0.0, -4000.0), Vector::new(0.0, 0.0, 0.0));

        assert_eq!(fixture.system_under_test.get_scene_info().path_tracing_iteration, 0);
    }

    #[test_context(Context)]
    #[test]
    fn test_unchanged_camera_keeps_refinement(fixture: &mut Context) {
        bitmap(fixture);
        let current = *fixture.system_under_test.session().camera();

        move_camera(fixture, current.eye(), Vector::new(0.0, 0.0, 0.0));

        assert_eq!(fixture.system_under_test.get_scene_info().path_tracing_iteration, 1);
    }

    #[test]
    fn test_reset_policy_can_be_disabled() {
        let config = ServiceConfig { reset_refinement_on_camera_change: false, ..make_test_config() };
        let mut fixture = make_context(&config);
        bitmap(&mut fixture);

        move_camera(&mut fixture, Point::new(5.0, 5.0, 5.0), Vector::new(0.3, 0.0, 0.0));

        assert_eq!(fixture.system_under_test.get_scene_info().path_tracing_iteration, 1);
    }

    #[test_context(Context)]
    #[test]
    fn test_angles_accumulate_across_requests(fixture: &mut Context) {
        let eye = Point::new(0.0, 0.0, -5000.0);
        move_camera(fixture, eye, Vector::new(0.1, 0.2, 0.0));
        move_camera(fixture, eye, Vector::new(0.1, 0.0, 0.0));

        let expected = CameraState::new(eye, Point::new(0.0, 0.0, 0.0), Vector::new(0.2, 0.2, 0.0));
        assert!(fixture.system_under_test.session().camera().same_view_as(&expected));
    }

    #[test_context(Context)]
    #[test]
    fn test_failure_is_reported_and_service_recovers(fixture: &mut Context) {
        let parameters = fixture.system_under_test.get_scene_info();
        fixture.probe.fail_at(Some(FailurePoint::UploadDynamic));

        assert!(fixture.system_under_test.get_bitmap(0.0, &parameters, &PostProcessing::default()).is_err());

        fixture.probe.fail_at(None);
        assert!(fixture.system_under_test.get_bitmap(0.0, &parameters, &PostProcessing::default()).is_ok());
    }
}
