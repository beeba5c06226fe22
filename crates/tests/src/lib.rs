#[cfg(test)]
mod common;

#[cfg(test)]
mod cabin_create_tests;

#[cfg(test)]
mod cabin_list_tests;

#[cfg(test)]
mod cabin_delete_tests;

#[cfg(test)]
mod cabin_image_tests;

#[cfg(test)]
mod health_tests;
