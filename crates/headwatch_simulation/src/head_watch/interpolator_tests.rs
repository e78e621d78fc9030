//! Tests for rate-limited interpolator.

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::Rng;

    use super::super::angles::HeadAngles;
    use super::super::config::TORSO_BONE;
    use super::super::interpolator::{
        commit_head_step, step_angles, step_axis, HeadStep, TorsoFrame,
    };
    use super::super::test_support::{seeded_rng, MockRig};

    fn step(rig: &MockRig, speed: f32, frame: TorsoFrame) -> HeadStep<'static> {
        HeadStep {
            head: rig.head_tag(),
            torso_bone: TORSO_BONE,
            speed,
            frame,
        }
    }

    #[test]
    fn test_step_axis() {
        assert_eq!(step_axis(0.0, 50.0, 30.0), 30.0);
        assert_eq!(step_axis(0.0, -50.0, 30.0), -30.0);
        // Цель ближе чем speed: встаём точно в цель
        assert_eq!(step_axis(10.0, 20.0, 30.0), 20.0);
        assert_eq!(step_axis(10.0, 10.0, 30.0), 10.0);
        // speed 0: стоим на месте
        assert_eq!(step_axis(10.0, 20.0, 0.0), 10.0);
    }

    #[test]
    fn test_axes_step_independently() {
        let stepped = step_angles(
            HeadAngles::new(0.0, 0.0, 15.0),
            HeadAngles::new(60.0, 5.0, 0.0),
            30.0,
        );

        assert_eq!(stepped, HeadAngles::new(30.0, 5.0, 0.0));
    }

    #[test]
    fn test_roll_always_zero() {
        let stepped = step_angles(
            HeadAngles::new(0.0, 0.0, 15.0),
            HeadAngles::new(0.0, 0.0, 40.0),
            30.0,
        );
        assert_eq!(stepped.roll, 0.0);
    }

    #[test]
    fn test_relative_frame_subtracts_torso_yaw() {
        let mut rig = MockRig::humanoid();
        rig.set_bone_angles(TORSO_BONE, HeadAngles::new(10.0, 0.0, 0.0));
        let mut current = HeadAngles::ZERO;
        let head_step = step(&rig, 30.0, TorsoFrame::Relative);

        let committed = commit_head_step(
            &mut rig,
            &mut current,
            HeadAngles::new(20.0, -5.0, 0.0),
            head_step,
        );

        // В кость уходит yaw относительно torso, current хранит до-torso значение
        assert_relative_eq!(committed.yaw, 10.0);
        assert_eq!(current, HeadAngles::new(20.0, -5.0, 0.0));
        assert_eq!(rig.head_angles(), committed);
        assert_eq!(rig.effective_head_pitch, Some(-5.0));
    }

    #[test]
    fn test_absolute_frame_ignores_torso() {
        let mut rig = MockRig::humanoid();
        rig.set_bone_angles(TORSO_BONE, HeadAngles::new(10.0, 0.0, 0.0));
        let mut current = HeadAngles::new(20.0, 0.0, 0.0);
        let head_step = step(&rig, 30.0, TorsoFrame::Absolute);

        let committed = commit_head_step(&mut rig, &mut current, HeadAngles::ZERO, head_step);

        assert_eq!(committed, HeadAngles::ZERO);
        assert_eq!(current, HeadAngles::ZERO);
    }

    #[test]
    fn test_missing_torso_bone_treated_as_zero() {
        let mut rig = MockRig::humanoid();
        let mut current = HeadAngles::ZERO;
        let head_step = HeadStep {
            torso_bone: "Bip01 Missing",
            ..step(&rig, 30.0, TorsoFrame::Relative)
        };

        let committed = commit_head_step(
            &mut rig,
            &mut current,
            HeadAngles::new(20.0, 0.0, 0.0),
            head_step,
        );
        assert_eq!(committed.yaw, 20.0);
    }

    #[test]
    fn test_commit_clears_existing_roll() {
        let mut rig = MockRig::humanoid();
        let mut current = HeadAngles::new(0.0, 0.0, 15.0);
        let head_step = step(&rig, 30.0, TorsoFrame::Absolute);

        commit_head_step(&mut rig, &mut current, HeadAngles::ZERO, head_step);

        assert_eq!(rig.head_angles().roll, 0.0);
        assert_eq!(current.roll, 0.0);
    }

    #[test]
    fn test_step_never_exceeds_speed() {
        let mut rng = seeded_rng();

        for _ in 0..500 {
            let current = HeadAngles::new(
                rng.gen_range(-180.0..180.0),
                rng.gen_range(-90.0..90.0),
                0.0,
            );
            let target = HeadAngles::new(
                rng.gen_range(-180.0..180.0),
                rng.gen_range(-90.0..90.0),
                0.0,
            );
            let speed = rng.gen_range(0.0..45.0);

            let stepped = step_angles(current, target, speed);

            assert!((stepped.yaw - current.yaw).abs() <= speed + 1e-4);
            assert!((stepped.pitch - current.pitch).abs() <= speed + 1e-4);
            // Шаг не проскакивает цель
            assert!((target.yaw - stepped.yaw).abs() <= (target.yaw - current.yaw).abs() + 1e-4);
            assert_eq!(stepped.roll, 0.0);
        }
    }
}
