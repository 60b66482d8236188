// Guarded access to the manager shared between timers, listeners and the
// page handle. A callback that fires while the manager is already borrowed
// further up the stack is skipped instead of panicking.

use std::cell::RefCell;

/// Run `f` with exclusive access unless `cell` is already borrowed.
/// Returns whether `f` ran.
pub fn try_update<T>(cell: &RefCell<T>, f: impl FnOnce(&mut T)) -> bool {
    match cell.try_borrow_mut() {
        Ok(mut value) => {
            f(&mut value);
            true
        }
        Err(_) => false,
    }
}

/// Read through `f`, or return `busy` while a mutable borrow is live.
pub fn read_or<T, U>(cell: &RefCell<T>, busy: U, f: impl FnOnce(&T) -> U) -> U {
    match cell.try_borrow() {
        Ok(value) => f(&value),
        Err(_) => busy,
    }
}
