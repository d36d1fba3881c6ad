#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationAggregate {
    pub count: u64,
    pub sum: i64,
    pub min: i32,
    pub max: i32,
}

impl StationAggregate {
    #[inline]
    pub fn new(temperature: i32) -> Self {
        Self {
            count: 1,
            sum: temperature as i64,
            min: temperature,
            max: temperature,
        }
    }

    #[inline]
    pub fn record(&mut self, temperature: i32) {
        self.count += 1;
        self.sum += temperature as i64;
        self.min = i32::min(self.min, temperature);
        self.max = i32::max(self.max, temperature);
    }

    #[inline]
    pub fn merge(&mut self, other: &StationAggregate) {
        self.count += other.count;
        self.sum += other.sum;
        self.min = i32::min(self.min, other.min);
        self.max = i32::max(self.max, other.max);
    }

    pub fn mean_tenths(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }
}
