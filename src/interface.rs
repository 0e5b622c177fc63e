//! The focuser interface: capability gating, command dispatch, and the
//! motion state machine.
//!
//! # Architecture Overview
//!
//! [`FocuserInterface`] sits between the external property transport and a
//! concrete [`FocuserDriver`]:
//!
//! ```text
//! client update --> process_number / process_switch
//!                     | capability + property-name gating
//!                     v
//!                 FocuserDriver (virtual motion operation)
//!                     | tri-state result
//!                     v
//!                 FocusState machine --> PropertyTransport (publish)
//! ```
//!
//! Dispatch is synchronous from whatever task the update callback is
//! delivered on; the host framework serializes updates per device, so the
//! interface holds no locks and spawns no background work. A `Busy` result
//! means the driver will later call [`FocuserInterface::report_completion`]
//! from its own timer or polling hook.

use log::{debug, info, warn};

use crate::capability::FocuserCapability;
use crate::config::FocuserParams;
use crate::driver::FocuserDriver;
use crate::error::{FocusError, FocusResult};
use crate::motion::{FocusDirection, MotionStatus, PropertyState, SwitchState};
use crate::property::{
    names, NumberMember, NumberProperty, PropertyTransport, SwitchMember, SwitchProperty,
};
use crate::state::FocusState;

/// The client-visible property slots, instantiated by `init_properties`.
///
/// All slots are built up front; which ones are actually defined against the
/// transport is decided by the capability mask in `update_properties`.
#[derive(Debug, Clone)]
struct FocuserProperties {
    motion: SwitchProperty,
    speed: NumberProperty,
    timer: NumberProperty,
    abs_pos: NumberProperty,
    rel_pos: NumberProperty,
    abort: SwitchProperty,
}

/// Control and state-reporting core for a motorized focuser.
///
/// The driver is a strategy object injected at construction; the capability
/// mask is frozen at the same moment and cannot change for the life of the
/// instance.
pub struct FocuserInterface<D: FocuserDriver> {
    driver: D,
    capability: FocuserCapability,
    params: FocuserParams,
    device: String,
    state: FocusState,
    props: Option<FocuserProperties>,
}

impl<D: FocuserDriver> FocuserInterface<D> {
    /// Create the interface for `device`, freezing the capability mask.
    pub fn new(device: &str, driver: D, capability: FocuserCapability, params: FocuserParams) -> Self {
        let state = FocusState::new(params.initial_position, params.initial_speed);
        Self {
            driver,
            capability,
            params,
            device: device.to_string(),
            state,
            props: None,
        }
    }

    /// The capability mask declared at construction.
    pub fn capability(&self) -> FocuserCapability {
        self.capability
    }

    /// Current cached motion state.
    pub fn state(&self) -> &FocusState {
        &self.state
    }

    /// Owning device name.
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Access the injected driver (used by host code and tests).
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the injected driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Instantiate the property slots under the given group label.
    ///
    /// Call once from the host device's own property initialization. Performs
    /// no transport calls; `update_properties` decides what clients see.
    pub fn init_properties(&mut self, group: &str) {
        let device = self.device.as_str();
        let params = &self.params;

        let motion = SwitchProperty::new(
            device,
            names::FOCUS_MOTION,
            "Direction",
            group,
            vec![
                SwitchMember::new(names::FOCUS_INWARD, "Focus in", true),
                SwitchMember::new(names::FOCUS_OUTWARD, "Focus out", false),
            ],
        );

        let speed = NumberProperty::new(
            device,
            names::FOCUS_SPEED,
            "Speed",
            group,
            vec![NumberMember::new(
                names::FOCUS_SPEED_VALUE,
                "Focus speed",
                params.speed_min,
                params.speed_max,
                params.speed_step,
                params.initial_speed,
            )],
        );

        let timer = NumberProperty::new(
            device,
            names::FOCUS_TIMER,
            "Timer",
            group,
            vec![NumberMember::new(
                names::FOCUS_TIMER_VALUE,
                "Focus timer (ms)",
                0.0,
                params.max_timer_ms as f64,
                50.0,
                0.0,
            )],
        );

        let abs_pos = NumberProperty::new(
            device,
            names::ABS_FOCUS_POSITION,
            "Absolute Position",
            group,
            vec![NumberMember::new(
                names::FOCUS_ABSOLUTE_POSITION,
                "Ticks",
                0.0,
                params.max_travel as f64,
                1000.0,
                params.initial_position as f64,
            )],
        );

        let rel_pos = NumberProperty::new(
            device,
            names::REL_FOCUS_POSITION,
            "Relative Position",
            group,
            vec![NumberMember::new(
                names::FOCUS_RELATIVE_POSITION,
                "Ticks",
                0.0,
                params.max_travel as f64,
                1000.0,
                0.0,
            )],
        );

        let abort = SwitchProperty::new(
            device,
            names::FOCUS_ABORT_MOTION,
            "Abort Motion",
            group,
            vec![SwitchMember::new(names::ABORT, "Abort", false)],
        );

        self.props = Some(FocuserProperties {
            motion,
            speed,
            timer,
            abs_pos,
            rel_pos,
            abort,
        });
        debug!("Focuser properties initialized for '{}'", self.device);
    }

    /// Define or delete the capability-gated property groups based on the
    /// host device's connection state.
    ///
    /// Performs no motion. Returns the transport outcome; a failure here
    /// means clients may see a stale surface and the host should retry.
    pub fn update_properties(
        &mut self,
        connected: bool,
        transport: &mut dyn PropertyTransport,
    ) -> FocusResult<()> {
        let props = self.props.as_ref().ok_or(FocusError::NotInitialized)?;
        let cap = self.capability;

        let map_err = |err: anyhow::Error| FocusError::Transport(format!("{err:#}"));

        if connected {
            transport.define_switch(&props.motion).map_err(map_err)?;
            if cap.has_variable_speed() {
                transport.define_number(&props.speed).map_err(map_err)?;
                transport.define_number(&props.timer).map_err(map_err)?;
            }
            if cap.can_abs_move() {
                transport.define_number(&props.abs_pos).map_err(map_err)?;
            }
            if cap.can_rel_move() {
                transport.define_number(&props.rel_pos).map_err(map_err)?;
            }
            if cap.can_abort() {
                transport.define_switch(&props.abort).map_err(map_err)?;
            }
            info!("Focuser properties defined for '{}'", self.device);
        } else {
            transport
                .delete_property(&self.device, names::FOCUS_MOTION)
                .map_err(map_err)?;
            if cap.has_variable_speed() {
                transport
                    .delete_property(&self.device, names::FOCUS_SPEED)
                    .map_err(map_err)?;
                transport
                    .delete_property(&self.device, names::FOCUS_TIMER)
                    .map_err(map_err)?;
            }
            if cap.can_abs_move() {
                transport
                    .delete_property(&self.device, names::ABS_FOCUS_POSITION)
                    .map_err(map_err)?;
            }
            if cap.can_rel_move() {
                transport
                    .delete_property(&self.device, names::REL_FOCUS_POSITION)
                    .map_err(map_err)?;
            }
            if cap.can_abort() {
                transport
                    .delete_property(&self.device, names::FOCUS_ABORT_MOTION)
                    .map_err(map_err)?;
            }
            info!("Focuser properties removed for '{}'", self.device);
        }
        Ok(())
    }

    /// Route an incoming numeric update to the motion operation it targets.
    ///
    /// Returns `true` when the update was handled by this interface. A
    /// foreign device name, an unknown property, or a slot whose capability
    /// bit is unset returns `false` ("not mine") without touching the
    /// driver, so other interfaces on the same device can claim the update.
    pub async fn process_number(
        &mut self,
        device: &str,
        name: &str,
        values: &[f64],
        member_names: &[&str],
        transport: &mut dyn PropertyTransport,
    ) -> bool {
        if device != self.device {
            return false;
        }
        let Some(props) = self.props.as_mut() else {
            warn!("Numeric update for '{name}' before properties were initialized");
            return false;
        };
        let cap = self.capability;

        match name {
            names::FOCUS_SPEED if cap.has_variable_speed() => {
                props.speed.apply(values, member_names);
                let speed = props.speed.first_value();
                match self.driver.set_speed(speed as i32).await {
                    Ok(()) => {
                        self.state.speed = speed;
                        self.state.speed_state = PropertyState::Ok;
                    }
                    Err(err) => {
                        warn!("Focuser rejected speed {speed}: {err:#}");
                        self.state.speed_state = PropertyState::Alert;
                    }
                }
                props.speed.state = self.state.speed_state;
                push_number(transport, &props.speed);
                true
            }

            names::FOCUS_TIMER if cap.has_variable_speed() => {
                props.timer.apply(values, member_names);
                let duration_ms = props.timer.first_value().max(0.0) as u32;
                self.state.last_timer_ms = duration_ms;
                let dir = self.state.direction;
                let speed = self.state.speed as i32;
                let status = self.driver.move_timed(dir, speed, duration_ms).await;
                self.state.timer_state = status.into();
                debug!(
                    "Timed move {} for {duration_ms} ms at speed {speed}: {}",
                    dir.as_str(),
                    status.as_str()
                );
                props.timer.state = self.state.timer_state;
                push_number(transport, &props.timer);
                true
            }

            names::ABS_FOCUS_POSITION if cap.can_abs_move() => {
                let target = number_for(values, member_names, names::FOCUS_ABSOLUTE_POSITION)
                    .unwrap_or_else(|| props.abs_pos.first_value())
                    .clamp(0.0, self.params.max_travel as f64) as u32;
                let status = self.driver.move_absolute(target).await;
                self.state.abs_state = status.into();
                match status {
                    MotionStatus::Ok => {
                        // Synchronous completion: the cache is authoritative.
                        self.state.position = target;
                        self.state.target = None;
                        props.abs_pos.set_first_value(target as f64);
                    }
                    MotionStatus::Busy => {
                        // Cached position stays untouched until the driver
                        // reports completion.
                        self.state.target = Some(target);
                    }
                    MotionStatus::Alert => {
                        self.state.target = None;
                        warn!("Absolute move to {target} ticks failed");
                    }
                }
                props.abs_pos.state = self.state.abs_state;
                push_number(transport, &props.abs_pos);
                true
            }

            names::REL_FOCUS_POSITION if cap.can_rel_move() => {
                props.rel_pos.apply(values, member_names);
                let delta = props.rel_pos.first_value().max(0.0) as u32;
                let dir = self.state.direction;
                let target = match dir {
                    FocusDirection::Inward => self.state.position.saturating_sub(delta),
                    FocusDirection::Outward => self
                        .state
                        .position
                        .saturating_add(delta)
                        .min(self.params.max_travel),
                };
                let status = self.driver.move_relative(dir, delta).await;
                self.state.rel_state = status.into();
                match status {
                    MotionStatus::Ok => {
                        self.state.position = target;
                        self.state.target = None;
                        if cap.can_abs_move() {
                            self.state.abs_state = PropertyState::Ok;
                            props.abs_pos.set_first_value(target as f64);
                            props.abs_pos.state = PropertyState::Ok;
                            push_number(transport, &props.abs_pos);
                        }
                    }
                    MotionStatus::Busy => {
                        self.state.target = Some(target);
                    }
                    MotionStatus::Alert => {
                        self.state.target = None;
                        warn!("Relative move of {delta} ticks {} failed", dir.as_str());
                    }
                }
                props.rel_pos.state = self.state.rel_state;
                push_number(transport, &props.rel_pos);
                true
            }

            _ => false,
        }
    }

    /// Route an incoming selector update to abort or direction bookkeeping.
    ///
    /// Same "not mine" semantics as [`process_number`](Self::process_number).
    pub async fn process_switch(
        &mut self,
        device: &str,
        name: &str,
        states: &[SwitchState],
        member_names: &[&str],
        transport: &mut dyn PropertyTransport,
    ) -> bool {
        if device != self.device {
            return false;
        }
        let Some(props) = self.props.as_mut() else {
            warn!("Selector update for '{name}' before properties were initialized");
            return false;
        };
        let cap = self.capability;

        match name {
            names::FOCUS_MOTION => {
                // Pure bookkeeping for future timed/relative moves; no motion.
                for (state, member) in states.iter().zip(member_names) {
                    if !state.is_on() {
                        continue;
                    }
                    match *member {
                        names::FOCUS_INWARD => self.state.direction = FocusDirection::Inward,
                        names::FOCUS_OUTWARD => self.state.direction = FocusDirection::Outward,
                        other => debug!("Ignoring unknown direction member '{other}'"),
                    }
                }
                let selected = match self.state.direction {
                    FocusDirection::Inward => names::FOCUS_INWARD,
                    FocusDirection::Outward => names::FOCUS_OUTWARD,
                };
                props.motion.select(selected);
                self.state.motion_state = PropertyState::Ok;
                props.motion.state = PropertyState::Ok;
                push_switch(transport, &props.motion);
                true
            }

            names::FOCUS_ABORT_MOTION if cap.can_abort() => {
                if !self.state.motion_busy() {
                    // Nothing to stop; report success without bothering the
                    // driver.
                    debug!("Abort requested while idle; nothing to stop");
                    self.state.abort_state = PropertyState::Ok;
                } else {
                    match self.driver.abort().await {
                        Ok(()) => {
                            info!("Focuser motion aborted");
                            self.state.abort_state = PropertyState::Ok;
                            self.state.halt_motion();
                            // Restore the last requested duration so the
                            // client sees what was interrupted.
                            props
                                .timer
                                .set_first_value(self.state.last_timer_ms as f64);
                            props.timer.state = self.state.timer_state;
                            props.abs_pos.state = self.state.abs_state;
                            props.rel_pos.state = self.state.rel_state;
                            push_number(transport, &props.timer);
                            if cap.can_abs_move() {
                                push_number(transport, &props.abs_pos);
                            }
                            if cap.can_rel_move() {
                                push_number(transport, &props.rel_pos);
                            }
                        }
                        Err(err) => {
                            // Motion state is left untouched; only the abort
                            // group shows the failure.
                            warn!("Failed to abort focuser motion: {err:#}");
                            self.state.abort_state = PropertyState::Alert;
                        }
                    }
                }
                props.abort.clear();
                props.abort.state = self.state.abort_state;
                push_switch(transport, &props.abort);
                true
            }

            _ => false,
        }
    }

    /// Out-of-band completion report from the concrete driver.
    ///
    /// Called from the driver's own timer callback or polling hook once an
    /// asynchronous move ends. Overwrites the cached position when the
    /// driver supplies one and publishes the final state of every group that
    /// was busy.
    pub fn report_completion(
        &mut self,
        status: MotionStatus,
        position: Option<u32>,
        transport: &mut dyn PropertyTransport,
    ) {
        let Some(props) = self.props.as_mut() else {
            warn!("Completion report before properties were initialized");
            return;
        };
        let cap = self.capability;
        let final_state: PropertyState = status.into();

        if let Some(ticks) = position {
            self.state.position = ticks;
            props.abs_pos.set_first_value(ticks as f64);
        }
        self.state.target = None;

        let mut touched = false;
        if self.state.timer_state == PropertyState::Busy {
            self.state.timer_state = final_state;
            props.timer.state = final_state;
            if status == MotionStatus::Ok {
                props.timer.set_first_value(0.0);
            }
            push_number(transport, &props.timer);
            touched = true;
        }
        if self.state.abs_state == PropertyState::Busy {
            self.state.abs_state = final_state;
            touched = true;
        }
        if self.state.rel_state == PropertyState::Busy {
            self.state.rel_state = final_state;
            props.rel_pos.state = final_state;
            push_number(transport, &props.rel_pos);
            touched = true;
        }
        if cap.can_abs_move() && (touched || position.is_some()) {
            props.abs_pos.state = self.state.abs_state;
            push_number(transport, &props.abs_pos);
        }

        if touched {
            debug!(
                "Motion completion: {} at position {}",
                status.as_str(),
                self.state.position
            );
        } else {
            debug!("Completion report with no motion in progress");
        }
    }
}

/// Push a number update; transport failures here are logged, never fatal.
fn push_number(transport: &mut dyn PropertyTransport, prop: &NumberProperty) {
    if let Err(err) = transport.update_number(prop) {
        warn!("Failed to push '{}' update: {err:#}", prop.name);
    }
}

/// Push a switch update; transport failures here are logged, never fatal.
fn push_switch(transport: &mut dyn PropertyTransport, prop: &SwitchProperty) {
    if let Err(err) = transport.update_switch(prop) {
        warn!("Failed to push '{}' update: {err:#}", prop.name);
    }
}

/// Find the value addressed to `member` in a parallel values/names pair.
fn number_for(values: &[f64], member_names: &[&str], member: &str) -> Option<f64> {
    values
        .iter()
        .zip(member_names)
        .find(|(_, name)| **name == member)
        .map(|(value, _)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::mock::{DriverCall, MockFocuser};
    use anyhow::bail;

    const DEVICE: &str = "Test Focuser";

    /// Minimal transport double for unit tests.
    #[derive(Default)]
    struct RecordingTransport {
        defined: Vec<String>,
        deleted: Vec<String>,
        updates: Vec<String>,
        fail_define: bool,
    }

    impl PropertyTransport for RecordingTransport {
        fn define_number(&mut self, property: &NumberProperty) -> anyhow::Result<()> {
            if self.fail_define {
                bail!("transport down");
            }
            self.defined.push(property.name.clone());
            Ok(())
        }

        fn define_switch(&mut self, property: &SwitchProperty) -> anyhow::Result<()> {
            if self.fail_define {
                bail!("transport down");
            }
            self.defined.push(property.name.clone());
            Ok(())
        }

        fn update_number(&mut self, property: &NumberProperty) -> anyhow::Result<()> {
            self.updates.push(property.name.clone());
            Ok(())
        }

        fn update_switch(&mut self, property: &SwitchProperty) -> anyhow::Result<()> {
            self.updates.push(property.name.clone());
            Ok(())
        }

        fn delete_property(&mut self, _device: &str, name: &str) -> anyhow::Result<()> {
            self.deleted.push(name.to_string());
            Ok(())
        }
    }

    fn interface(cap: FocuserCapability) -> FocuserInterface<MockFocuser> {
        let mut fi = FocuserInterface::new(DEVICE, MockFocuser::new(), cap, FocuserParams::default());
        fi.init_properties("Focus Control");
        fi
    }

    #[test]
    fn test_update_properties_before_init_fails() {
        let mut fi = FocuserInterface::new(
            DEVICE,
            MockFocuser::new(),
            FocuserCapability::all(),
            FocuserParams::default(),
        );
        let mut transport = RecordingTransport::default();
        let err = fi.update_properties(true, &mut transport).unwrap_err();
        assert!(matches!(err, FocusError::NotInitialized));
    }

    #[test]
    fn test_update_properties_defines_gated_groups() {
        let mut fi = interface(
            FocuserCapability::CAN_ABS_MOVE | FocuserCapability::CAN_ABORT,
        );
        let mut transport = RecordingTransport::default();
        fi.update_properties(true, &mut transport).unwrap();

        assert!(transport.defined.contains(&names::FOCUS_MOTION.to_string()));
        assert!(transport
            .defined
            .contains(&names::ABS_FOCUS_POSITION.to_string()));
        assert!(transport
            .defined
            .contains(&names::FOCUS_ABORT_MOTION.to_string()));
        assert!(!transport.defined.contains(&names::FOCUS_SPEED.to_string()));
        assert!(!transport
            .defined
            .contains(&names::REL_FOCUS_POSITION.to_string()));

        fi.update_properties(false, &mut transport).unwrap();
        assert!(transport
            .deleted
            .contains(&names::ABS_FOCUS_POSITION.to_string()));
        assert!(!transport
            .deleted
            .contains(&names::REL_FOCUS_POSITION.to_string()));
    }

    #[test]
    fn test_update_properties_surfaces_transport_failure() {
        let mut fi = interface(FocuserCapability::all());
        let mut transport = RecordingTransport {
            fail_define: true,
            ..Default::default()
        };
        let err = fi.update_properties(true, &mut transport).unwrap_err();
        assert!(matches!(err, FocusError::Transport(_)));
    }

    #[tokio::test]
    async fn test_speed_dispatch_ok_and_alert() {
        let mut fi = interface(FocuserCapability::HAS_VARIABLE_SPEED);
        let mut transport = RecordingTransport::default();

        let handled = fi
            .process_number(
                DEVICE,
                names::FOCUS_SPEED,
                &[5.0],
                &[names::FOCUS_SPEED_VALUE],
                &mut transport,
            )
            .await;
        assert!(handled);
        assert_eq!(fi.state().speed_state, PropertyState::Ok);
        assert_eq!(fi.state().speed, 5.0);
        assert_eq!(fi.driver().calls, vec![DriverCall::SetSpeed(5)]);

        fi.driver_mut().accept_speed = false;
        fi.process_number(
            DEVICE,
            names::FOCUS_SPEED,
            &[9.0],
            &[names::FOCUS_SPEED_VALUE],
            &mut transport,
        )
        .await;
        assert_eq!(fi.state().speed_state, PropertyState::Alert);
        // Rejected value is not cached.
        assert_eq!(fi.state().speed, 5.0);
    }

    #[tokio::test]
    async fn test_foreign_device_and_unknown_property_are_not_mine() {
        let mut fi = interface(FocuserCapability::all());
        let mut transport = RecordingTransport::default();

        assert!(
            !fi.process_number(
                "Other Device",
                names::FOCUS_SPEED,
                &[5.0],
                &[names::FOCUS_SPEED_VALUE],
                &mut transport,
            )
            .await
        );
        assert!(
            !fi.process_number(DEVICE, "CCD_EXPOSURE", &[1.0], &["VALUE"], &mut transport)
                .await
        );
        assert!(fi.driver().calls.is_empty());
    }

    #[tokio::test]
    async fn test_direction_switch_is_bookkeeping_only() {
        let mut fi = interface(FocuserCapability::empty());
        let mut transport = RecordingTransport::default();

        let handled = fi
            .process_switch(
                DEVICE,
                names::FOCUS_MOTION,
                &[SwitchState::Off, SwitchState::On],
                &[names::FOCUS_INWARD, names::FOCUS_OUTWARD],
                &mut transport,
            )
            .await;
        assert!(handled);
        assert_eq!(fi.state().direction, FocusDirection::Outward);
        assert_eq!(fi.state().motion_state, PropertyState::Ok);
        assert!(fi.driver().calls.is_empty());
    }

    #[tokio::test]
    async fn test_timer_dispatch_uses_cached_speed_and_direction() {
        let mut fi = interface(FocuserCapability::HAS_VARIABLE_SPEED);
        let mut transport = RecordingTransport::default();

        fi.process_number(
            DEVICE,
            names::FOCUS_SPEED,
            &[100.0],
            &[names::FOCUS_SPEED_VALUE],
            &mut transport,
        )
        .await;
        fi.process_switch(
            DEVICE,
            names::FOCUS_MOTION,
            &[SwitchState::Off, SwitchState::On],
            &[names::FOCUS_INWARD, names::FOCUS_OUTWARD],
            &mut transport,
        )
        .await;
        fi.process_number(
            DEVICE,
            names::FOCUS_TIMER,
            &[750.0],
            &[names::FOCUS_TIMER_VALUE],
            &mut transport,
        )
        .await;

        assert_eq!(fi.state().last_timer_ms, 750);
        assert_eq!(
            fi.driver().calls.last(),
            Some(&DriverCall::MoveTimed {
                dir: FocusDirection::Outward,
                speed: 100,
                duration_ms: 750,
            })
        );
        assert_eq!(fi.state().timer_state, PropertyState::Ok);
    }

    #[tokio::test]
    async fn test_abort_restores_timer_value() {
        let mut fi = interface(
            FocuserCapability::HAS_VARIABLE_SPEED | FocuserCapability::CAN_ABORT,
        );
        fi.driver_mut().timed_reply = MotionStatus::Busy;
        let mut transport = RecordingTransport::default();

        fi.process_number(
            DEVICE,
            names::FOCUS_TIMER,
            &[1500.0],
            &[names::FOCUS_TIMER_VALUE],
            &mut transport,
        )
        .await;
        assert_eq!(fi.state().timer_state, PropertyState::Busy);

        fi.process_switch(
            DEVICE,
            names::FOCUS_ABORT_MOTION,
            &[SwitchState::On],
            &[names::ABORT],
            &mut transport,
        )
        .await;
        assert_eq!(fi.state().abort_state, PropertyState::Ok);
        assert_eq!(fi.state().timer_state, PropertyState::Idle);
        assert_eq!(fi.state().last_timer_ms, 1500);
        assert_eq!(fi.driver().calls_matching(|c| *c == DriverCall::Abort), 1);
    }

    #[tokio::test]
    async fn test_failed_abort_leaves_motion_state_unchanged() {
        let mut fi = interface(FocuserCapability::CAN_ABS_MOVE | FocuserCapability::CAN_ABORT);
        fi.driver_mut().abs_reply = MotionStatus::Busy;
        fi.driver_mut().accept_abort = false;
        let mut transport = RecordingTransport::default();

        fi.process_number(
            DEVICE,
            names::ABS_FOCUS_POSITION,
            &[500.0],
            &[names::FOCUS_ABSOLUTE_POSITION],
            &mut transport,
        )
        .await;
        fi.process_switch(
            DEVICE,
            names::FOCUS_ABORT_MOTION,
            &[SwitchState::On],
            &[names::ABORT],
            &mut transport,
        )
        .await;

        assert_eq!(fi.state().abort_state, PropertyState::Alert);
        assert_eq!(fi.state().abs_state, PropertyState::Busy);
    }

    #[tokio::test]
    async fn test_relative_move_updates_absolute_slot_on_completion() {
        let mut fi = interface(
            FocuserCapability::CAN_REL_MOVE | FocuserCapability::CAN_ABS_MOVE,
        );
        let mut transport = RecordingTransport::default();

        fi.process_switch(
            DEVICE,
            names::FOCUS_MOTION,
            &[SwitchState::Off, SwitchState::On],
            &[names::FOCUS_INWARD, names::FOCUS_OUTWARD],
            &mut transport,
        )
        .await;
        fi.process_number(
            DEVICE,
            names::REL_FOCUS_POSITION,
            &[250.0],
            &[names::FOCUS_RELATIVE_POSITION],
            &mut transport,
        )
        .await;

        assert_eq!(fi.state().rel_state, PropertyState::Ok);
        assert_eq!(fi.state().position, 250);
        assert!(transport
            .updates
            .contains(&names::ABS_FOCUS_POSITION.to_string()));
    }

    #[tokio::test]
    async fn test_report_completion_overwrites_cached_position() {
        let mut fi = interface(FocuserCapability::CAN_ABS_MOVE);
        fi.driver_mut().abs_reply = MotionStatus::Busy;
        let mut transport = RecordingTransport::default();

        fi.process_number(
            DEVICE,
            names::ABS_FOCUS_POSITION,
            &[500.0],
            &[names::FOCUS_ABSOLUTE_POSITION],
            &mut transport,
        )
        .await;
        assert_eq!(fi.state().abs_state, PropertyState::Busy);
        assert_eq!(fi.state().position, 0);
        assert_eq!(fi.state().target, Some(500));

        fi.report_completion(MotionStatus::Ok, Some(500), &mut transport);
        assert_eq!(fi.state().abs_state, PropertyState::Ok);
        assert_eq!(fi.state().position, 500);
        assert_eq!(fi.state().target, None);
    }
}
