mod rmsprop;
