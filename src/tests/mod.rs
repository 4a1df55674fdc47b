mod finder_test;
mod svg_utils;
