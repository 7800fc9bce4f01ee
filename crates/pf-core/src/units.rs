// pf-core/src/units.rs

use uom::si::f64::{
    DynamicViscosity as UomDynamicViscosity, Length as UomLength, MassDensity as UomMassDensity,
    Power as UomPower, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn kpa(v: f64) -> Pressure {
    use uom::si::pressure::kilopascal;
    Pressure::new::<kilopascal>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn m3ph(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_hour;
    VolumeRate::new::<cubic_meter_per_hour>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn watt(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

pub mod constants {
    /// Standard gravity.
    pub const G0_MPS2: f64 = 9.806_65;

    /// Standard atmosphere.
    pub const P_ATM_PA: f64 = 101_325.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _l = m(2.0);
        let _rho = kg_per_m3(998.2);
        let _mu = pa_s(1.002e-3);
        let _v = mps(1.2);
        let _w = watt(1.0);
    }

    #[test]
    fn constructors_store_si_values() {
        assert!((mm(52.5).value - 0.0525).abs() < 1e-15);
        assert!((kpa(2.339).value - 2339.0).abs() < 1e-9);
        assert!((m3ph(36.0).value - 0.01).abs() < 1e-15);
        assert!((celsius(20.0).value - 293.15).abs() < 1e-9);
    }
}
