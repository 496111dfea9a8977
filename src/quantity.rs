#[macro_use]
mod macros;

pub mod cost;
pub mod emission;
pub mod energy;
pub mod power;
pub mod price;
pub mod time;

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{energy::KilowattHours, power::Kilowatts, time::Hours};

    quantity!(Bare, suffix: "", precision: 1);

    #[test]
    fn test_ordering() {
        assert!(Bare(1.0) < Bare(2.0));
        assert_eq!(Bare(1.0).max(Bare(2.0)), Bare(2.0));
        assert!(Bare(f64::NAN) > Bare(f64::INFINITY), "NaN must be totally ordered");
    }

    #[test]
    fn test_sum() {
        let sum: Bare = [Bare(1.0), Bare(2.5), Bare(-0.5)].into_iter().sum();
        assert_abs_diff_eq!(sum.0, 3.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Kilowatts(1.5).to_string(), "1.500 kW");
        assert_eq!(format!("{:?}", KilowattHours(0.5)), "0.500kWh");
    }

    #[test]
    fn test_energy() {
        assert_abs_diff_eq!((Kilowatts(4.0) * Hours(0.25)).0, 1.0);
    }
}
