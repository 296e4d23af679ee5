#[cfg(test)]
mod tests {
    use crate::engine::engine_error::EngineError;
    use crate::render::render_error::RenderError;
    use crate::render::render_stage::RenderStage;
    use crate::render::scene_parameters::SceneParameters;
    use crate::render::session::RenderSession;
    use crate::scene::material::Material;
    use crate::tests::scaffolding::recording_engine::tests::{EngineCall, EngineProbe, FailurePoint, RecordingEngine};
    use crate::tests::scaffolding::session_setup::tests::{make_test_config, populate};
    use palette::Srgb;
    use std::time::Duration;
    use test_context::{test_context, TestContext};

    struct Context {
        system_under_test: RenderSession<RecordingEngine>,
        probe: EngineProbe,
        frame: Vec<u8>,
    }

    impl TestContext for Context {
        fn setup() -> Context {
            let (engine, probe) = RecordingEngine::new();
            let mut system_under_test = RenderSession::new(&make_test_config(), engine).unwrap();
            populate(system_under_test.scene_mut());
            let frame = vec![0; system_under_test.frame_bytes_count()];
            probe.forget();
            Context { system_under_test, probe, frame }
        }

        fn teardown(self) {
        }
    }

    fn render(fixture: &mut Context) -> Result<(), RenderError> {
        fixture.system_under_test.render(0.0, &mut fixture.frame)
    }

    #[test]
    fn test_engine_is_initialized_with_frame_and_jitter_sizes() {
        let (engine, probe) = RecordingEngine::new();
        let _system_under_test = RenderSession::new(&make_test_config(), engine).unwrap();

        assert_eq!(probe.calls(), vec![EngineCall::Initialize { frame_bytes: 4 * 2 * 4, random_values: 4 * 2 }]);
    }

    #[test]
    fn test_engine_is_shut_down_with_session() {
        let (engine, probe) = RecordingEngine::new();
        let system_under_test = RenderSession::new(&make_test_config(), engine).unwrap();

        drop(system_under_test);

        assert_eq!(probe.calls().last(), Some(&EngineCall::Shutdown));
    }

    #[test_context(Context)]
    #[test]
    fn test_first_cycle_order(fixture: &mut Context) {
        render(fixture).unwrap();

        let expected = vec![
            EngineCall::UploadDynamic { boxes: 3, primitives: 3, lights: 1 },
            EngineCall::UploadStatic { materials: 1, textures: 0 },
            EngineCall::Execute { iteration: 0, draft: 3 },
            EngineCall::ReadBack,
        ];
        assert_eq!(fixture.probe.calls(), expected);
        assert_eq!(fixture.system_under_test.stage(), RenderStage::Idle);
    }

    #[test_context(Context)]
    #[test]
    fn test_static_data_goes_once(fixture: &mut Context) {
        for _ in 0..5 {
            render(fixture).unwrap();
        }

        assert_eq!(fixture.probe.static_uploads(), 1);
        assert_eq!(fixture.probe.count(|call| matches!(call, EngineCall::UploadDynamic { .. })), 5);
        assert_eq!(fixture.system_under_test.statistics().static_uploads, 1);
    }

    #[test_context(Context)]
    #[test]
    fn test_invalidation_resends_static_data_once(fixture: &mut Context) {
        render(fixture).unwrap();
        fixture.system_under_test.invalidate_static();

        for _ in 0..3 {
            render(fixture).unwrap();
        }

        assert_eq!(fixture.probe.static_uploads(), 2);
    }

    #[test_context(Context)]
    #[test]
    fn test_material_change_without_invalidation_is_only_reported(fixture: &mut Context) {
        render(fixture).unwrap();
        let material = fixture.system_under_test.scene_mut().add_material().unwrap();
        assert!(fixture.system_under_test.scene_mut().set_material(material, &Material::new()));

        render(fixture).unwrap();
        render(fixture).unwrap();

        assert_eq!(fixture.probe.static_uploads(), 1);
        assert_eq!(fixture.system_under_test.sync_cache().stale_frames(), 2);
    }

    #[test_context(Context)]
    #[test]
    fn test_frame_reaches_caller(fixture: &mut Context) {
        render(fixture).unwrap();
        render(fixture).unwrap();

        assert!(fixture.frame.iter().all(|byte| *byte == 1));
    }

    #[test_context(Context)]
    #[test]
    fn test_small_output_is_refused_before_the_cycle(fixture: &mut Context) {
        let mut output = vec![0u8; 31];

        let actual = fixture.system_under_test.render(0.0, &mut output);

        assert!(matches!(actual, Err(RenderError::OutputBufferTooSmall { required: 32, provided: 31 })));
        assert!(fixture.probe.calls().is_empty());
    }

    #[test_context(Context)]
    #[test]
    fn test_larger_output_is_accepted(fixture: &mut Context) {
        let mut output = vec![0xAB; 40];

        fixture.system_under_test.render(0.0, &mut output).unwrap();

        assert_eq!(&output[32..], &[0xAB; 8]);
    }

    #[test_context(Context)]
    #[test]
    fn test_failed_static_upload_is_retried(fixture: &mut Context) {
        fixture.probe.fail_at(Some(FailurePoint::UploadStatic));
        let actual = render(fixture);
        assert!(matches!(actual, Err(RenderError::Engine { stage: RenderStage::DynamicUploaded, .. })));
        assert_eq!(fixture.system_under_test.stage(), RenderStage::Idle);
        assert_eq!(fixture.system_under_test.sync_cache().needs_static_upload(), true);

        fixture.probe.fail_at(None);
        render(fixture).unwrap();

        assert_eq!(fixture.probe.static_uploads(), 1);
        assert_eq!(fixture.system_under_test.sync_cache().needs_static_upload(), false);
    }

    #[test_context(Context)]
    #[test]
    fn test_kernel_failure_leaves_scene_and_refinement_untouched(fixture: &mut Context) {
        let primitives_before = fixture.system_under_test.scene().primitives_count();
        fixture.probe.fail_at(Some(FailurePoint::Execute));

        let actual = render(fixture);

        match actual {
            Err(RenderError::Engine { stage, source }) => {
                assert_eq!(stage, RenderStage::StaticUploaded);
                assert!(matches!(source, EngineError::LaunchFailed { .. }));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(fixture.system_under_test.scene().primitives_count(), primitives_before);
        assert_eq!(fixture.system_under_test.scene_parameters().path_tracing_iteration, 0);
        assert_eq!(fixture.system_under_test.draft(), 3);
        assert_eq!(fixture.system_under_test.statistics().failed_frames, 1);
    }

    #[test_context(Context)]
    #[test]
    fn test_read_back_failure_stage(fixture: &mut Context) {
        render(fixture).unwrap();
        fixture.probe.fail_at(Some(FailurePoint::ReadBack));

        let actual = render(fixture);

        assert!(matches!(actual, Err(RenderError::Engine { stage: RenderStage::KernelExecuted, .. })));
    }

    #[test_context(Context)]
    #[test]
    fn test_refinement_advances_and_saturates(fixture: &mut Context) {
        for _ in 0..6 {
            render(fixture).unwrap();
        }

        let executions: Vec<EngineCall> = fixture.probe.calls().into_iter().filter(|call| matches!(call, EngineCall::Execute { .. })).collect();
        let expected = vec![
            EngineCall::Execute { iteration: 0, draft: 3 },
            EngineCall::Execute { iteration: 1, draft: 2 },
            EngineCall::Execute { iteration: 2, draft: 1 },
            EngineCall::Execute { iteration: 3, draft: 1 },
            EngineCall::Execute { iteration: 4, draft: 1 },
            EngineCall::Execute { iteration: 4, draft: 1 },
        ];
        assert_eq!(executions, expected);
    }

    #[test_context(Context)]
    #[test]
    fn test_reset_restarts_refinement(fixture: &mut Context) {
        render(fixture).unwrap();
        render(fixture).unwrap();

        fixture.system_under_test.reset_progressive_refinement();

        assert_eq!(fixture.system_under_test.scene_parameters().path_tracing_iteration, 0);
        assert_eq!(fixture.system_under_test.draft(), 3);
    }

    #[test_context(Context)]
    #[test]
    fn test_camera_move_does_not_reset_refinement(fixture: &mut Context) {
        render(fixture).unwrap();

        fixture.system_under_test.set_camera(
            crate::geometry::alias::Point::new(1.0, 2.0, 3.0),
            crate::geometry::alias::Point::new(0.0, 0.0, 0.0),
            crate::geometry::alias::Vector::new(0.1, 0.0, 0.0),
        );

        assert_eq!(fixture.system_under_test.scene_parameters().path_tracing_iteration, 1);
    }

    #[test_context(Context)]
    #[test]
    fn test_scene_parameters_round_trip(fixture: &mut Context) {
        let expected = SceneParameters {
            shadows_enabled: false,
            ray_iterations: 7,
            view_distance: 1234.0,
            ..SceneParameters::default()
        }
        .with_background(Srgb::new(0.1, 0.2, 0.3));

        fixture.system_under_test.set_scene_parameters(expected);

        assert_eq!(fixture.system_under_test.scene_parameters(), &expected);
    }

    #[test]
    fn test_slow_kernel_is_counted_not_stopped() {
        let (engine, _probe) = RecordingEngine::new();
        let config = crate::config::ServiceConfig { kernel_deadline_ms: 0, ..make_test_config() };
        let mut system_under_test = RenderSession::new(&config, engine.with_kernel_delay(Duration::from_millis(2))).unwrap();
        let mut frame = vec![0; system_under_test.frame_bytes_count()];

        system_under_test.render(0.0, &mut frame).unwrap();

        assert_eq!(system_under_test.statistics().deadline_overruns, 1);
        assert_eq!(system_under_test.statistics().frames_rendered, 1);
    }

    #[test]
    fn test_empty_scene_renders() {
        let (engine, probe) = RecordingEngine::new();
        let mut system_under_test = RenderSession::new(&make_test_config(), engine).unwrap();
        let mut frame = vec![0; system_under_test.frame_bytes_count()];

        system_under_test.render(0.0, &mut frame).unwrap();

        assert!(probe.calls().contains(&EngineCall::UploadDynamic { boxes: 0, primitives: 0, lights: 0 }));
    }
}
