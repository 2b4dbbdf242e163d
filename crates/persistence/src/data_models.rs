// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Number of persons attached to one college.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeCount {
    /// English name of the college.
    pub name: String,
    pub count: usize,
}

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_persons: usize,
    pub total_students: usize,
    pub total_staff: usize,
    pub total_visitors: usize,
    pub total_cards: usize,
    pub active_cards: usize,
    pub expired_cards: usize,
    pub total_colleges: usize,
    pub total_departments: usize,
    /// One entry per college, in college id order.
    pub by_college: Vec<CollegeCount>,
}
