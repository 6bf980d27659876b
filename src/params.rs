/// Elementary charge in coulombs.
pub const CHARGE_UNIT: f64 = 1.60217662e-19;
/// Electron rest mass in kilograms.
pub const ELECTRON_MASS: f64 = 9.100938356e-31;

/// Radius substituted when the computed orbit radius is NaN or infinite
/// (zero field strength, zero voltage) so the path indicator stays visible.
pub const FALLBACK_RADIUS: f64 = 100.0;

/// Read-only access to the live control values, plus the quantities
/// derived from them. The simulator reads these fresh on every step, so
/// slider changes take effect mid-flight without any snapshotting.
pub trait ParamSource {
    /// Accelerating voltage in volts. Signed, unvalidated.
    fn voltage(&self) -> f64;

    /// Magnetic field strength in tesla. Signed, unvalidated.
    fn field_strength(&self) -> f64;

    /// Speed an electron reaches after crossing the accelerating gap:
    /// qV = mv²/2, solved for v. NaN for negative voltage.
    fn velocity_magnitude(&self) -> f64 {
        let kinetic_energy = CHARGE_UNIT * self.voltage();
        (2.0 * kinetic_energy / ELECTRON_MASS).sqrt()
    }

    /// Signed radius of the circular orbit, in meters. Non-finite when
    /// the field strength or voltage is zero.
    fn orbit_radius(&self) -> f64 {
        let v = self.velocity_magnitude();
        let lorentz_accel = self.field_strength() * CHARGE_UNIT * v / ELECTRON_MASS;
        v * v / lorentz_accel
    }

    /// Diameter of the orbit, in meters.
    fn orbit_diameter(&self) -> f64 {
        2.0 * self.orbit_radius().abs()
    }

    /// Orbit radius with the degenerate cases patched over, suitable
    /// for drawing the path circle.
    fn display_radius(&self) -> f64 {
        let radius = self.orbit_radius();
        if radius.is_finite() {
            radius
        } else {
            FALLBACK_RADIUS
        }
    }
}

/// The two user-controlled values. Setters accept anything; physically
/// nonsensical inputs produce degenerate but non-crashing output.
pub struct Params {
    voltage: f64,
    field_strength: f64,
}

impl Params {
    pub fn new(voltage: f64, field_strength: f64) -> Self {
        Self {
            voltage,
            field_strength,
        }
    }

    pub fn set_voltage(&mut self, voltage: f64) {
        self.voltage = voltage;
    }

    pub fn set_field_strength(&mut self, field_strength: f64) {
        self.field_strength = field_strength;
    }
}

impl ParamSource for Params {
    fn voltage(&self) -> f64 {
        self.voltage
    }

    fn field_strength(&self) -> f64 {
        self.field_strength
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_is_finite_and_monotonic_for_positive_voltage() {
        let voltages = [1.0, 10.0, 100.0, 1000.0, 5000.0];
        let mut last = 0.0;
        for v in voltages {
            let params = Params::new(v, 0.01);
            let speed = params.velocity_magnitude();
            assert!(speed.is_finite(), "speed not finite at {v} V");
            assert!(speed > last, "speed not increasing at {v} V");
            last = speed;
        }
    }

    #[test]
    fn zero_field_falls_back_to_fixed_draw_radius() {
        let params = Params::new(1000.0, 0.0);
        assert!(!params.orbit_radius().is_finite());
        assert_eq!(params.display_radius(), FALLBACK_RADIUS);
    }

    #[test]
    fn zero_voltage_falls_back_to_fixed_draw_radius() {
        let params = Params::new(0.0, 0.01);
        assert_eq!(params.velocity_magnitude(), 0.0);
        assert!(!params.orbit_radius().is_finite());
        assert_eq!(params.display_radius(), FALLBACK_RADIUS);
    }

    #[test]
    fn radius_sign_follows_field_but_diameter_is_positive() {
        let pos = Params::new(1000.0, 0.01);
        let neg = Params::new(1000.0, -0.01);
        assert!(pos.orbit_radius() > 0.0);
        assert!(neg.orbit_radius() < 0.0);
        assert!(pos.orbit_diameter() > 0.0);
        assert!(neg.orbit_diameter() > 0.0);
        assert_eq!(pos.orbit_diameter(), neg.orbit_diameter());
    }

    #[test]
    fn setters_take_effect_on_derived_values() {
        let mut params = Params::new(1000.0, 0.01);
        let before = params.orbit_radius();
        params.set_voltage(4000.0);
        // Quadrupling the voltage doubles the speed, and with it the radius.
        let after = params.orbit_radius();
        assert!((after / before - 2.0).abs() < 1e-9);
        params.set_field_strength(0.02);
        assert!((params.orbit_radius() / before - 1.0).abs() < 1e-9);
    }
}
