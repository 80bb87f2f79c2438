mod tests_definitions;
mod tests_end_to_end;
mod tests_lifecycle;
mod tests_scheduling;
