#[cfg(test)]
pub(crate) mod tests {
    use crate::engine::compute_engine::{ComputeEngine, DynamicPayload, EngineSetup, KernelLaunch, StaticPayload};
    use crate::engine::engine_error::EngineError;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::thread::sleep;
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum EngineCall {
        Initialize { frame_bytes: usize, random_values: usize },
        UploadDynamic { boxes: usize, primitives: usize, lights: usize },
        UploadStatic { materials: usize, textures: usize },
        Execute { iteration: u32, draft: u32 },
        ReadBack,
        Shutdown,
    }

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub(crate) enum FailurePoint {
        UploadDynamic,
        UploadStatic,
        Execute,
        ReadBack,
    }

    /// Shared view on a [`RecordingEngine`] that outlives the session owning it.
    #[derive(Clone, Default)]
    pub(crate) struct EngineProbe {
        calls: Rc<RefCell<Vec<EngineCall>>>,
        failure: Rc<Cell<Option<FailurePoint>>>,
    }

    impl EngineProbe {
        pub(crate) fn fail_at(&self, point: Option<FailurePoint>) {
            self.failure.set(point);
        }

        #[must_use]
        pub(crate) fn calls(&self) -> Vec<EngineCall> {
            self.calls.borrow().clone()
        }

        #[must_use]
        pub(crate) fn count(&self, predicate: impl Fn(&EngineCall) -> bool) -> usize {
            self.calls.borrow().iter().filter(|call| predicate(call)).count()
        }

        #[must_use]
        pub(crate) fn static_uploads(&self) -> usize {
            self.count(|call| matches!(call, EngineCall::UploadStatic { .. }))
        }

        pub(crate) fn forget(&self) {
            self.calls.borrow_mut().clear();
        }
    }

    /// Engine that records every call and renders frames whose bytes all
    /// equal the path-tracing iteration of the launch.
    pub(crate) struct RecordingEngine {
        probe: EngineProbe,
        frame: Vec<u8>,
        kernel_delay: Duration,
    }

    impl RecordingEngine {
        #[must_use]
        pub(crate) fn new() -> (Self, EngineProbe) {
            let probe = EngineProbe::default();
            (Self { probe: probe.clone(), frame: Vec::new(), kernel_delay: Duration::ZERO }, probe)
        }

        #[must_use]
        pub(crate) fn with_kernel_delay(mut self, kernel_delay: Duration) -> Self {
            self.kernel_delay = kernel_delay;
            self
        }

        fn record(&self, call: EngineCall) {
            self.probe.calls.borrow_mut().push(call);
        }

        fn check(&self, point: FailurePoint) -> Result<(), EngineError> {
            if self.probe.failure.get() == Some(point) {
                return Err(EngineError::LaunchFailed { what: format!("injected failure at {:?}", point) });
            }
            Ok(())
        }
    }

    impl ComputeEngine for RecordingEngine {
        fn initialize(&mut self, setup: &EngineSetup) -> Result<(), EngineError> {
            self.frame = vec![0; setup.frame_size.bytes_count(setup.color_depth)];
            self.record(EngineCall::Initialize { frame_bytes: self.frame.len(), random_values: setup.random_table_size });
            Ok(())
        }

        fn upload_dynamic(&mut self, payload: &DynamicPayload) -> Result<(), EngineError> {
            self.check(FailurePoint::UploadDynamic)?;
            self.record(EngineCall::UploadDynamic {
                boxes: payload.boxes.objects_count,
                primitives: payload.primitives.objects_count,
                lights: payload.lights.objects_count,
            });
            Ok(())
        }

        fn upload_static(&mut self, payload: &StaticPayload) -> Result<(), EngineError> {
            self.check(FailurePoint::UploadStatic)?;
            self.record(EngineCall::UploadStatic { materials: payload.materials.objects_count, textures: payload.textures.objects_count });
            Ok(())
        }

        fn execute(&mut self, launch: &KernelLaunch) -> Result<(), EngineError> {
            self.check(FailurePoint::Execute)?;
            if !self.kernel_delay.is_zero() {
                sleep(self.kernel_delay);
            }
            let iteration = launch.scene_parameters.path_tracing_iteration;
            self.frame.fill(iteration as u8);
            self.record(EngineCall::Execute { iteration, draft: launch.draft });
            Ok(())
        }

        fn read_back(&mut self, target: &mut [u8]) -> Result<(), EngineError> {
            self.check(FailurePoint::ReadBack)?;
            target[..self.frame.len()].copy_from_slice(&self.frame);
            self.record(EngineCall::ReadBack);
            Ok(())
        }

        fn shutdown(&mut self) {
            self.record(EngineCall::Shutdown);
        }
    }
}
