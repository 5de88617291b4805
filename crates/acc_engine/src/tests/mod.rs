//! End-to-end behavior of the registry over a [`ClassTable`](acc_host::ClassTable).

mod calls;
mod scenarios;
